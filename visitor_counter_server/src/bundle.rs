use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use minify_js::{Session, TopLevelMode, minify};
use thiserror::Error;
use wasm_bindgen_cli_support::Bindgen;
use xshell::{Shell, cmd};

use crate::fs::{list_files_recursively, route_for};
use crate::http::{EndpointAnyBuilder, EndpointWithoutContentBuilder, ServerConfig};
use crate::options::ServerOptions;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cargo build failed: {0}")]
    Cargo(#[from] xshell::Error),
    #[error("wasm-bindgen failed: {0}")]
    Bindgen(String),
    #[error("unable to minify '{0}'")]
    Minify(PathBuf),
    #[error("unable to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Compiles the crate in `crate_dir` to wasm and runs wasm-bindgen over it,
/// leaving the JS glue and `_bg.wasm` in `out_dir`.
pub fn build_wasm(crate_dir: &Path, crate_name: &str, is_release: bool, target_dir: &Path, out_dir: &Path) -> Result<(), BuildError> {
    let target_dir = std::env::current_dir()?.join(target_dir);
    let target_dir_arg = target_dir.to_string_lossy().into_owned();
    let mut args = vec![
        "build",
        "--target", "wasm32-unknown-unknown",
        "--target-dir", target_dir_arg.as_str(),
        "--color", "always",
    ];
    if is_release {
        args.extend([
            "--config", "profile.release.lto=true",
            "--config", "profile.release.opt-level='z'",
            "--config", "profile.release.codegen-units=1",
            "--config", "profile.release.panic='abort'",
            "--release",
        ]);
    };
    let args = args; // Remove mut
    let sh = Shell::new()?;
    {
        let _dir_guard = sh.push_dir(crate_dir);
        info!("Building {}", crate_dir.display());
        cmd!(sh, "cargo").args(args).quiet().run()?;
    }
    let profile = if is_release { "release" } else { "debug" };
    let input_path = target_dir
        .join("wasm32-unknown-unknown")
        .join(profile)
        .join(format!("{crate_name}.wasm"));
    fs::create_dir_all(out_dir)?;
    Bindgen::new()
        .input_path(&input_path)
        .web(true)
        .map_err(|err| BuildError::Bindgen(err.to_string()))?
        .demangle(!is_release)
        .debug(!is_release)
        .remove_name_section(is_release)
        .remove_producers_section(is_release)
        .generate(out_dir)
        .map_err(|err| BuildError::Bindgen(err.to_string()))
}

pub fn minify_javascript(code_in: &[u8]) -> Option<Vec<u8>>{
    let session = Session::new();
    let mut code_out = vec![];
    minify(&session, TopLevelMode::Module, code_in, &mut code_out).ok()?;
    Some(code_out)
}

/// Endpoint table for an already built bundle: the crate's `index.html`
/// plus everything wasm-bindgen wrote to `out_dir`.
pub fn load_site(crate_dir: &Path, out_dir: &Path, is_release: bool) -> Result<ServerConfig, BuildError> {
    let read = |path: &Path| fs::read(path).map_err(|source| BuildError::Read { path: path.into(), source });
    let mut config = ServerConfig::new();

    let index = read(&crate_dir.join("index.html"))?;
    config.on_get_request("/index.html").set_response_body(index).build();
    config.on_get_request("/").internal_redirect("/index.html").build();

    for file in list_files_recursively(out_dir)? {
        let Some(route) = route_for(out_dir, &file) else { continue };
        let mut body = read(&file)?;
        if is_release && file.extension().is_some_and(|ext| ext == "js") {
            body = minify_javascript(&body).ok_or_else(|| BuildError::Minify(file.clone()))?;
        }
        debug!("Serving {} at {route}", file.display());
        config.on_get_request(&route).set_response_body(body).build();
    }
    Ok(config)
}

/// Builds the web crate and loads the result.
pub fn build_site(options: &ServerOptions) -> Result<ServerConfig, BuildError> {
    let out_dir = options.out_dir();
    build_wasm(&options.path, &options.crate_name(), options.release, &options.target_dir(), &out_dir)?;
    load_site(&options.path, &out_dir, options.release)
}
