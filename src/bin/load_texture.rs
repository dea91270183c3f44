//! A textured quad. Shaders and the image are read from the asset root.

use learngl::abs::{App, Mesh, ShaderProgram, Texture, load_image};
use learngl::Error;
use learngl::geometry::{QUAD_INDICES, TEXTURED_QUAD_VERTICES};

fn main() {
    learngl::launch(|config| {
        let assets = config.assets.resolve()?;
        log::info!("using assets from {}", assets.root.display());

        let mut app = App::new(&config.window)?;

        let program =
            ShaderProgram::from_files(&app.gl, &assets.vertex_shader, &assets.fragment_shader)?;
        program.use_program();
        program.set_uniform("ourTexture", 0);

        let quad = Mesh::new(
            &app.gl,
            &TEXTURED_QUAD_VERTICES,
            Some(QUAD_INDICES.as_slice()),
            glow::TRIANGLES,
        )
        .map_err(Error::Gl)?;

        let image = load_image(&assets.texture, config.assets.flip_vertically)?;
        let texture = Texture::new(&app.gl, image).map_err(Error::Gl)?;
        log::debug!("texture is {}x{}", texture.width(), texture.height());

        app.run(|_| {
            texture.bind(0);
            program.use_program();
            quad.draw();
        });
        Ok(())
    });
}
