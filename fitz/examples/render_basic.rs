use nalgebra::{point, vector};

use fitz::{IRect, Library, PageRotation, Pixmap, RenderFlags, Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args();
    let file = args.nth(1).unwrap();
    let password = args.next();

    let lib = Library::init()?;
    let doc = lib.open_file(&file, password.as_deref())?;

    if let Some(title) = doc.title() {
        println!("title: {title}");
    }

    let pages = doc.pages();

    for i in 0..pages.count() {
        let page = pages.get(i)?;
        let size = page.size();
        let rotation = page.rotation();

        println!("render page {i} to file 'out-{i}.png'");

        // Allocate a buffer for rendering; rotating by 90 or 270 degrees
        // swaps the output axes.
        let (width, height) = match rotation {
            PageRotation::Deg90 | PageRotation::Deg270 => {
                (size.y.ceil() as u32, size.x.ceil() as u32)
            }
            _ => (size.x.ceil() as u32, size.y.ceil() as u32),
        };

        let mut buf = vec![0; width as usize * height as usize * 4];

        {
            // Create a pixmap with our buffer as backing
            let view_box = IRect::from_size(width, height);
            let mut pixmap = Pixmap::from_buf(lib.clone(), view_box, &mut buf[..])?;

            // Map the page onto the full view box, honoring its rotation.
            let transform = page.display_transform(
                point![0.0_f32, 0.0],
                vector![width as f32, height as f32],
                rotation,
            );

            page.render(&mut pixmap, &transform, RenderFlags::default())?;
        }

        // The render output is packed 0RGB words; unpack to RGBA for the
        // 'image' crate.
        let mut rgba = Vec::with_capacity(buf.len());
        for px in buf.chunks_exact(4) {
            let v = u32::from_ne_bytes(px.try_into().unwrap());
            rgba.extend_from_slice(&[(v >> 16) as u8, (v >> 8) as u8, v as u8, 0xff]);
        }

        // Save the file
        let img = image::ImageBuffer::from_raw(width, height, rgba).unwrap();
        let img = image::DynamicImage::ImageRgba8(img);
        img.save(format!("out-{i}.png")).unwrap();
    }

    Ok(())
}
