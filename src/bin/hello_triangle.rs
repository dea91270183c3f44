//! A single orange triangle drawn from an unindexed vertex buffer.

use learngl::abs::{App, Mesh};
use learngl::geometry::TRIANGLE_VERTICES;
use learngl::{Error, shader_program};

fn main() {
    learngl::launch(|config| {
        let mut app = App::new(&config.window)?;

        let triangle =
            Mesh::new(&app.gl, &TRIANGLE_VERTICES, None, glow::TRIANGLES).map_err(Error::Gl)?;
        let program = shader_program!(app.gl, triangle)?;

        app.run(|_| {
            program.use_program();
            triangle.draw();
        });
        Ok(())
    });
}
