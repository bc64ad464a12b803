//! Host-side helper: `cargo run` builds the WASM bundle, bakes the image playlist into
//! `static/index.html` and serves `static/` locally.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::fs;
    use std::path::PathBuf;
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context, Result};
    use clap::{Parser, ValueEnum};

    use slideshow_wasm::site::{collect_images, render_index};
    use slideshow_wasm::{LoopMode, SlideshowConfig};

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum Looping {
        Continuous,
        Once,
    }

    #[derive(Parser, Debug)]
    #[command(about = "Build and serve the looping image slideshow")]
    struct Args {
        /// Directory holding the slideshow images (must live under the static root)
        #[arg(long, default_value = "static/images")]
        images: PathBuf,

        /// URL prefix the page uses to reach the images
        #[arg(long, default_value = "images")]
        url_prefix: String,

        /// Length of one full pass through all images
        #[arg(long, default_value_t = 120_000)]
        total_ms: u32,

        /// Transition window at the end of each slide
        #[arg(long, default_value_t = 1200)]
        fade_ms: u32,

        #[arg(long, value_enum, default_value_t = Looping::Continuous)]
        looping: Looping,

        /// Fixed seed for reproducible ordering
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 8000)]
        port: u16,

        /// Serve whatever is already in static/pkg
        #[arg(long)]
        skip_wasm: bool,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        if !args.skip_wasm {
            build_wasm()?;
        }

        // 1. Collect the playlist and render the page
        let slides = collect_images(&args.images, &args.url_prefix)
            .with_context(|| format!("reading images from {}", args.images.display()))?;
        println!("Found {} images", slides.len());

        let config = SlideshowConfig {
            slides,
            total_show_ms: args.total_ms,
            fade_ms: args.fade_ms,
            loop_mode: match args.looping {
                Looping::Continuous => LoopMode::Continuous,
                Looping::Once => LoopMode::Once,
            },
            seed: args.seed,
            ..SlideshowConfig::default()
        };
        println!("Per-slide duration: {}ms", config.slide_ms());

        let template = fs::read_to_string("static/index.template.html")
            .context("reading static/index.template.html")?;
        let page = render_index(&template, &config)?;
        fs::write("static/index.html", page).context("writing static/index.html")?;

        // 2. Start simple HTTP server serving `static/`
        println!("Launching local server at http://127.0.0.1:{} …", args.port);
        let port = args.port.to_string();
        let status = Command::new("python3")
            .args(["-m", "http.server", port.as_str(), "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .context("failed to start http server (python3 not found?)")?;
        if !status.success() {
            bail!("http server exited with {status}");
        }
        Ok(())
    }

    fn build_wasm() -> Result<()> {
        println!("Building WASM pkg …");
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
            Ok(st) if st.success() => Ok(()),
            Ok(_) => bail!(
                "wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/)."
            ),
            Err(_) => {
                eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
                Ok(())
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
