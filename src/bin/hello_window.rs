//! An empty window cleared to a solid color every frame.

use learngl::abs::App;

fn main() {
    learngl::launch(|config| {
        let mut app = App::new(&config.window)?;
        app.on_resize(|width, height| log::info!("window resized to {width}x{height}"));

        let frames = app.run(|_| {});
        log::info!("window closed after {frames} frames");
        Ok(())
    });
}
