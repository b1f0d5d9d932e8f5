//! Cluster connection flag bundle
//!
//! Mirrors the standard kubectl connection flags. Every flag is persistent
//! (global) so subcommands inherit it. Individual registrations can be
//! switched off before `add_flags` when the host command defines a flag of
//! the same name itself.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};

pub const KUBECONFIG: &str = "kubeconfig";
pub const CACHE_DIR: &str = "cache-dir";
pub const CERTIFICATE_AUTHORITY: &str = "certificate-authority";
pub const CLIENT_CERTIFICATE: &str = "client-certificate";
pub const CLIENT_KEY: &str = "client-key";
pub const TOKEN: &str = "token";
pub const IMPERSONATE: &str = "as";
pub const IMPERSONATE_UID: &str = "as-uid";
pub const IMPERSONATE_GROUP: &str = "as-group";
pub const CLUSTER: &str = "cluster";
pub const USER: &str = "user";
pub const NAMESPACE: &str = "namespace";
pub const CONTEXT: &str = "context";
pub const SERVER: &str = "server";
pub const TLS_SERVER_NAME: &str = "tls-server-name";
pub const INSECURE: &str = "insecure-skip-tls-verify";
pub const REQUEST_TIMEOUT: &str = "request-timeout";
pub const DISABLE_COMPRESSION: &str = "disable-compression";

const HEADING: &str = "Cluster connection";

/// Connection parameters for the target cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubeConfigArgs {
    pub kubeconfig: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub certificate_authority: Option<PathBuf>,
    pub client_certificate: Option<PathBuf>,
    pub client_key: Option<PathBuf>,
    pub bearer_token: Option<String>,
    pub impersonate: Option<String>,
    pub impersonate_uid: Option<String>,
    pub impersonate_groups: Vec<String>,
    pub cluster_name: Option<String>,
    pub auth_info_name: Option<String>,
    pub context: Option<String>,
    pub namespace: String,
    pub api_server: Option<String>,
    pub tls_server_name: Option<String>,
    pub insecure: bool,
    pub request_timeout: Option<String>,
    pub disable_compression: bool,

    register_api_server: bool,
    register_request_timeout: bool,
}

impl KubeConfigArgs {
    /// Bundle with every flag enabled and `namespace` as the namespace default.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            kubeconfig: None,
            cache_dir: None,
            certificate_authority: None,
            client_certificate: None,
            client_key: None,
            bearer_token: None,
            impersonate: None,
            impersonate_uid: None,
            impersonate_groups: vec![],
            cluster_name: None,
            auth_info_name: None,
            context: None,
            namespace: namespace.into(),
            api_server: None,
            tls_server_name: None,
            insecure: false,
            request_timeout: None,
            disable_compression: false,
            register_api_server: true,
            register_request_timeout: true,
        }
    }

    /// Do not register `--server`/`-s`.
    pub fn disable_api_server(&mut self) {
        self.register_api_server = false;
    }

    /// Do not register `--request-timeout`.
    pub fn disable_request_timeout(&mut self) {
        self.register_request_timeout = false;
    }

    pub fn registers_api_server(&self) -> bool {
        self.register_api_server
    }

    pub fn registers_request_timeout(&self) -> bool {
        self.register_request_timeout
    }

    /// Register the enabled flags as persistent flags of `cmd`.
    pub fn add_flags(&self, cmd: Command) -> Command {
        let mut cmd = cmd
            .arg(path_flag(KUBECONFIG, "Path to the kubeconfig file to use for CLI requests"))
            .arg(path_flag(CACHE_DIR, "Default cache directory"))
            .arg(path_flag(
                CERTIFICATE_AUTHORITY,
                "Path to a cert file for the certificate authority",
            ))
            .arg(path_flag(
                CLIENT_CERTIFICATE,
                "Path to a client certificate file for TLS",
            ))
            .arg(path_flag(CLIENT_KEY, "Path to a client key file for TLS"))
            .arg(string_flag(
                TOKEN,
                "Bearer token for authentication to the API server",
            ))
            .arg(string_flag(
                IMPERSONATE,
                "Username to impersonate for the operation. User could be a regular user or a service account in a namespace",
            ))
            .arg(string_flag(
                IMPERSONATE_UID,
                "UID to impersonate for the operation",
            ))
            .arg(
                string_flag(
                    IMPERSONATE_GROUP,
                    "Group to impersonate for the operation, this flag can be repeated to specify multiple groups",
                )
                .action(ArgAction::Append),
            )
            .arg(string_flag(CLUSTER, "The name of the kubeconfig cluster to use"))
            .arg(string_flag(USER, "The name of the kubeconfig user to use"))
            .arg(
                string_flag(NAMESPACE, "If present, the namespace scope for this CLI request")
                    .short('n')
                    .default_value(self.namespace.clone()),
            )
            .arg(string_flag(CONTEXT, "The name of the kubeconfig context to use"))
            .arg(string_flag(
                TLS_SERVER_NAME,
                "Server name to use for server certificate validation. If it is not provided, the hostname used to contact the server is used",
            ))
            .arg(bool_flag(
                INSECURE,
                "If true, the server's certificate will not be checked for validity. This will make your HTTPS connections insecure",
            ))
            .arg(bool_flag(
                DISABLE_COMPRESSION,
                "If true, opt-out of response compression for all requests to the server",
            ));

        if self.register_api_server {
            cmd = cmd.arg(
                string_flag(SERVER, "The address and port of the Kubernetes API server").short('s'),
            );
        }
        if self.register_request_timeout {
            cmd = cmd.arg(
                string_flag(
                    REQUEST_TIMEOUT,
                    "The length of time to wait before giving up on a single server request. Non-zero values should contain a corresponding time unit (e.g. 1s, 2m, 3h). A value of zero means don't timeout requests",
                )
                .default_value("0"),
            );
        }
        cmd
    }

    /// Read parsed values back. Flags that are not registered on the command
    /// leave their field untouched.
    pub fn update_from(&mut self, matches: &ArgMatches) {
        let path = |id: &str| lookup::<PathBuf>(matches, id);
        let string = |id: &str| lookup::<String>(matches, id);

        self.kubeconfig = path(KUBECONFIG).or(self.kubeconfig.take());
        self.cache_dir = path(CACHE_DIR).or(self.cache_dir.take());
        self.certificate_authority = path(CERTIFICATE_AUTHORITY).or(self.certificate_authority.take());
        self.client_certificate = path(CLIENT_CERTIFICATE).or(self.client_certificate.take());
        self.client_key = path(CLIENT_KEY).or(self.client_key.take());
        self.bearer_token = string(TOKEN).or(self.bearer_token.take());
        self.impersonate = string(IMPERSONATE).or(self.impersonate.take());
        self.impersonate_uid = string(IMPERSONATE_UID).or(self.impersonate_uid.take());
        if let Ok(Some(groups)) = matches.try_get_many::<String>(IMPERSONATE_GROUP) {
            self.impersonate_groups = groups.cloned().collect();
        }
        self.cluster_name = string(CLUSTER).or(self.cluster_name.take());
        self.auth_info_name = string(USER).or(self.auth_info_name.take());
        self.context = string(CONTEXT).or(self.context.take());
        if let Some(ns) = string(NAMESPACE) {
            self.namespace = ns;
        }
        self.api_server = string(SERVER).or(self.api_server.take());
        self.tls_server_name = string(TLS_SERVER_NAME).or(self.tls_server_name.take());
        self.request_timeout = string(REQUEST_TIMEOUT).or(self.request_timeout.take());
        if let Some(insecure) = lookup::<bool>(matches, INSECURE) {
            self.insecure = insecure;
        }
        if let Some(disable) = lookup::<bool>(matches, DISABLE_COMPRESSION) {
            self.disable_compression = disable;
        }
    }
}

fn lookup<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Option<T> {
    matches.try_get_one::<T>(id).ok().flatten().cloned()
}

fn string_flag(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .help(help)
        .global(true)
        .help_heading(HEADING)
        .action(ArgAction::Set)
}

fn path_flag(id: &'static str, help: &'static str) -> Arg {
    string_flag(id, help).value_parser(clap::value_parser!(PathBuf))
}

fn bool_flag(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .help(help)
        .global(true)
        .help_heading(HEADING)
        .action(ArgAction::SetTrue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &KubeConfigArgs, argv: &[&str]) -> ArgMatches {
        args.add_flags(Command::new("flux"))
            .try_get_matches_from(argv)
            .unwrap()
    }

    #[test]
    fn namespace_default_comes_from_bundle() {
        let mut args = KubeConfigArgs::new("flux-system");
        let matches = parse(&args, &["flux"]);
        args.update_from(&matches);
        assert_eq!(args.namespace, "flux-system");
    }

    #[test]
    fn reads_connection_flags() {
        let mut args = KubeConfigArgs::new("flux-system");
        let matches = parse(
            &args,
            &[
                "flux",
                "-n",
                "apps",
                "--context",
                "kind-dev",
                "--kubeconfig",
                "/tmp/kubeconfig",
                "--as-group",
                "a",
                "--as-group",
                "b",
                "--insecure-skip-tls-verify",
                "-s",
                "https://127.0.0.1:6443",
            ],
        );
        args.update_from(&matches);

        assert_eq!(args.namespace, "apps");
        assert_eq!(args.context.as_deref(), Some("kind-dev"));
        assert_eq!(args.kubeconfig, Some(PathBuf::from("/tmp/kubeconfig")));
        assert_eq!(args.impersonate_groups, vec!["a", "b"]);
        assert!(args.insecure);
        assert_eq!(args.api_server.as_deref(), Some("https://127.0.0.1:6443"));
    }

    #[test]
    fn disabled_flags_are_not_registered() {
        let mut args = KubeConfigArgs::new("flux-system");
        args.disable_api_server();
        args.disable_request_timeout();
        let cmd = args.add_flags(Command::new("flux"));

        assert!(cmd.get_arguments().all(|a| a.get_id() != SERVER));
        assert!(cmd.get_arguments().all(|a| a.get_id() != REQUEST_TIMEOUT));
        assert!(cmd
            .clone()
            .try_get_matches_from(["flux", "--request-timeout", "5s"])
            .is_err());
    }
}
