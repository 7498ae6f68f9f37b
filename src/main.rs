//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves `static/` on a local HTTP server for trying the backgrounds.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::process::{Command, Stdio};
    use std::{env, thread, time::Duration};

    use tracing::{error, info, warn};

    tracing_subscriber::fmt().with_target(false).init();

    let port = env::var("BACKDROP_PORT").unwrap_or_else(|_| "8000".to_string());

    // 1. Build wasm bundle
    info!("building wasm package");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(st) => {
            error!(status = %st, "wasm-pack failed; is wasm-pack installed (https://rustwasm.github.io/wasm-pack/)?");
            std::process::exit(1);
        }
        Err(err) => {
            warn!(%err, "wasm-pack not found in PATH; serving whatever static/pkg already holds");
        }
    }

    // 2. Serve static/
    info!(url = %format!("http://127.0.0.1:{port}/?bg=squares"), "launching local server");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    let _server = match server {
        Ok(child) => child,
        Err(err) => {
            error!(%err, "failed to start http server (python3 required)");
            std::process::exit(1);
        }
    };

    // Keep process alive
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
