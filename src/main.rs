use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{ error, info };

use bezier_canvas::bitmap;
use bezier_canvas::error::SceneError;
use bezier_canvas::scene::Scene;

/// Projects the objects of a JSON scene onto a 24-bit bitmap.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Scene description (JSON).
    scene: PathBuf,

    /// Where to write the bitmap.
    #[clap(short, long, default_value = "out.bmp")]
    output: PathBuf,

    /// Skip the scene's blur pass.
    #[clap(long)]
    no_blur: bool,
}

fn run(args: Args) -> Result<(), SceneError> {
    let mut scene = Scene::load(&args.scene)?;
    info!("loaded {:?}: {} objects on a {}x{} canvas",
        args.scene, scene.objects.len(), scene.width, scene.height);

    if args.no_blur {
        scene.blur = None;
    }

    bitmap::render_to(&args.output, scene.width, scene.height, |canvas| scene.render(canvas))?;
    info!("wrote {:?}", args.output);

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    if let Err(e) = run(Args::parse()) {
        error!("{}", e);
        process::exit(1);
    }
}
