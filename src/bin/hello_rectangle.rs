//! A purple square built from two indexed triangles.

use learngl::abs::{App, Mesh};
use learngl::geometry::{QUAD_INDICES, RECTANGLE_VERTICES};
use learngl::{Error, shader_program};

fn main() {
    learngl::launch(|config| {
        let mut app = App::new(&config.window)?;

        let rectangle = Mesh::new(
            &app.gl,
            &RECTANGLE_VERTICES,
            Some(QUAD_INDICES.as_slice()),
            glow::TRIANGLES,
        )
        .map_err(Error::Gl)?;
        let program = shader_program!(app.gl, rectangle)?;

        app.run(|_| {
            program.use_program();
            rectangle.draw();
        });
        Ok(())
    });
}
