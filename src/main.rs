// retrofb - Main entry point
//
// Demonstrates the presentation pipeline: acquires the display device,
// draws a test pattern through a generated palette, and presents it.

use retrofb::display::{PALETTE_SIZE, SURFACE_HEIGHT, SURFACE_WIDTH};
use retrofb::session::{PresentationConfig, PresentationSession};

/// Build a demonstration palette: a gray ramp followed by red, green and
/// blue ramps, 64 entries each.
fn demo_palette() -> [[u8; 3]; PALETTE_SIZE] {
    let mut palette = [[0u8; 3]; PALETTE_SIZE];
    for (i, entry) in palette.iter_mut().enumerate() {
        let v = ((i % 64) * 4) as u8;
        *entry = match i / 64 {
            0 => [v, v, v],
            1 => [v, 0, 0],
            2 => [0, v, 0],
            _ => [0, 0, v],
        };
    }
    palette
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("retrofb v0.1.0");
    println!("==============");
    println!();

    let config = PresentationConfig::load_or_default();
    let mut session = PresentationSession::initialize(&config);

    let geometry = session.geometry().clone();
    println!("Presentation target");
    println!(
        "  Device: {}x{} at {} bpp",
        geometry.width, geometry.height, geometry.bits_per_pixel
    );
    println!("  Logical surface: {}x{}", SURFACE_WIDTH, SURFACE_HEIGHT);
    println!();

    session.set_palette(&demo_palette());
    session.surface_mut().test_pattern();

    session.hooks_mut().start_frame();
    session.hooks_mut().start_tic();
    session.present();
    println!("Presented one frame.");

    let path = session.capture_screenshot(
        &config.capture.screenshot_directory,
        config.capture.include_timestamp,
    )?;
    println!("Screenshot saved to {}", path.display());

    session.shutdown();
    println!("Presentation session closed.");
    Ok(())
}
