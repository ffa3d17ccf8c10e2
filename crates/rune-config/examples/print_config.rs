/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    // Load configuration from morph.toml plus MORPH_* overrides
    let config = rune_config::MorphConfig::load();

    println!("=== Rune Morph Configuration ===\n");

    println!("Animation Settings:");
    println!("  Duration: {}ms", config.animation.duration_ms);
    println!("  Spacing: {}ms", config.animation.spacing_ms);
    println!("  Auto Slide: {}", config.animation.auto_slide);
    println!("  Show: {}", config.animation.show);
    println!("  Hide: {}", config.hide_preset());
    println!("  Easing: {:?}", config.animation.easing);
    println!();

    println!("Layout Settings:");
    println!("  Alignment: {}", config.layout.alignment);
    println!("  Walk: {}", config.layout.walk);
    println!("  Width: {}", config.layout.width);
    println!(
        "  Padding: left {} right {} top {}",
        config.layout.padding_left, config.layout.padding_right, config.layout.padding_top
    );
    println!();

    println!("Text Settings:");
    println!("  Font: {:?}", config.text.font);
    println!("  Text Size: {}", config.text.text_size);
    println!("  Color: {}", config.text.color);
    println!("  Color Blend: {}", config.text.color_blend);
    println!();

    println!("Demo Settings:");
    println!("  Phrases: {:?}", config.demo.phrases);
    println!("  Frame Interval: {}ms", config.demo.frame_interval_ms);
    println!();

    // Try to serialize to TOML for verification
    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
