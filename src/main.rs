use bugwalk_rs::app::AppHandler;
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional asset directory as the single command line argument
    let args: Vec<String> = std::env::args().collect();
    let asset_dir = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("model")
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = AppHandler::new(asset_dir)?;
    event_loop.run_app(&mut handler)?;

    Ok(())
}
