use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("Incomplete argument '{0}', expected '=' or ':' after the option name")]
    MissingSeparator(String),
    #[error("Incomplete argument '{0}', expected value after the separator")]
    MissingValue(String),
    #[error("Unable to parse {name}, '{value}' is not {expected}")]
    InvalidValue { name: String, value: String, expected: &'static str },
    #[error("Unknown option: '{0}', help: available options are: 'addr', 'path', 'port', 'release' and 'watch'")]
    Unknown(String),
}

/// How the dev server is started: `visitor_counter_server port=3000 watch=false`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerOptions {
    pub addr: String,
    pub port: u16,
    /// Directory of the web crate to build and serve.
    pub path: PathBuf,
    pub watch: bool,
    pub release: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        ServerOptions {
            addr: "127.0.0.1".into(),
            port: 8080,
            path: "visitor_counter_web".into(),
            watch: true,
            release: false,
        }
    }
}

impl ServerOptions {
    pub fn parse_args<I, S>(args: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = ServerOptions::default();
        for arg in args {
            let arg = arg.as_ref();
            let Some(split) = arg.find(['=', ':']) else {
                return Err(OptionsError::MissingSeparator(arg.into()));
            };
            let (name, value) = (&arg[..split], &arg[split + 1..]);
            let value = value.trim_matches('"');
            if value.is_empty() {
                return Err(OptionsError::MissingValue(arg.into()));
            }
            let invalid = |expected| OptionsError::InvalidValue {
                name: name.into(),
                value: value.into(),
                expected,
            };
            match name {
                "addr"    => options.addr = value.into(),
                "path"    => options.path = value.into(),
                "port"    => options.port = value.parse().map_err(|_| invalid("a u16"))?,
                "watch"   => options.watch = value.parse().map_err(|_| invalid("boolean"))?,
                "release" => options.release = value.parse().map_err(|_| invalid("boolean"))?,
                _         => return Err(OptionsError::Unknown(name.into())),
            }
        }
        Ok(options)
    }

    pub fn socket_addr(&self) -> String {
        if self.addr.contains(':') {
            format!("[{}]:{}", self.addr, self.port)
        } else {
            format!("{}:{}", self.addr, self.port)
        }
    }

    /// Name of the wasm artifact cargo produces for the web crate.
    pub fn crate_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().replace('-', "_"))
            .unwrap_or_else(|| "visitor_counter_web".into())
    }

    pub fn target_dir(&self) -> PathBuf {
        PathBuf::from("target").join("visitor_counter_server")
    }

    /// Where wasm-bindgen output lands and is served from.
    pub fn out_dir(&self) -> PathBuf {
        let profile = if self.release { "release" } else { "debug" };
        self.target_dir().join("www").join(profile)
    }
}
