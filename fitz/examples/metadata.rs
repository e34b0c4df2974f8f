use fitz::{Library, MetadataTag, Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let file = std::env::args_os().nth(1).unwrap();

    let lib = Library::init()?;
    let doc = lib.open_file(&file, None)?;

    println!("File:");
    println!("  title: {:?}", doc.title());
    println!("  pages: {:?}", doc.pages().count());

    let tags = [
        MetadataTag::Title,
        MetadataTag::Subject,
        MetadataTag::Author,
        MetadataTag::CreationDate,
        MetadataTag::Creator,
        MetadataTag::Keywords,
        MetadataTag::ModDate,
        MetadataTag::Producer,
    ];

    println!();
    println!("Metadata:");
    for tag in tags {
        let key = tag.as_str();
        let value = doc.metadata().get(tag)?.unwrap_or_else(|| "<unset>".into());

        println!("  {key}: {value:?}");
    }

    println!();
    println!("Pages:");
    let pages = doc.pages();
    for i in 0..pages.count() {
        let page = pages.get(i)?;
        let media_box = page.media_box();
        let rotation = page.rotation();

        println!(
            "  Page {i}: media box: [{} {} {} {}], rotation: {} deg",
            media_box.x0, media_box.y0, media_box.x1, media_box.y1,
            rotation.as_degrees()
        );
    }

    Ok(())
}
