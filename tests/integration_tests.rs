// Integration tests for palette-match
use palette_match::{
    AnalysisOptions, Catalog, analyze_file, generate_swatch_svg, hex_to_rgb, kmeans, load_catalog,
    load_image, process_image, rgb_to_hex, sample_pixels,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rgb::RGBA8;
use std::fs;
use std::path::PathBuf;

const CATALOG_JSON: &str = r##"[
    {"id": "ff0000ff4000c00000ff2000", "colors": ["#ff0000", "#ff4000", "#c00000", "#ff2000"], "likes": 5, "date": "1 day"},
    {"id": "0000ff0040ff0000c02020ff", "colors": ["#0000ff", "#0040ff", "#0000c0", "#2020ff"], "likes": 9, "date": "3 days"},
    {"id": "00ff0040ff4000c00020ff20", "colors": ["#00ff00", "#40ff40", "#00c000", "#20ff20"], "likes": 1, "date": "1 week"},
    {"name": "Paper", "colors": ["#ffffff", "#f0f0f0", "#e0e0e0", "#d0d0d0"]},
    {"name": "Ink", "colors": ["#000000", "#101010", "#202020", "#303030"]}
]"##;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(name)
}

fn write_catalog(name: &str) -> PathBuf {
    let path = temp_path(name);
    fs::write(&path, CATALOG_JSON).expect("Failed to write catalog");
    path
}

// Create a simple test image programmatically
fn create_test_png(path: &PathBuf, width: u32, height: u32, pattern: &str) {
    let mut pixel_data: Vec<u8> = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height {
        for x in 0..width {
            let (r, g, b, a) = match pattern {
                "halves" => {
                    if x < width / 2 {
                        (255, 0, 0, 255)
                    } else {
                        (0, 0, 255, 255)
                    }
                }
                "red_on_clear" => {
                    if x < width / 4 {
                        (220, 10, 10, 255)
                    } else {
                        (0, 255, 0, 0)
                    }
                }
                "transparent" => (255, 255, 255, 0),
                "noise" => (
                    ((x * 37 + y * 11) % 256) as u8,
                    ((x * 13 + y * 71) % 256) as u8,
                    ((x * 5 + y * 3) % 256) as u8,
                    255,
                ),
                _ => (128, 128, 128, 255),
            };
            pixel_data.extend_from_slice(&[r, g, b, a]);
        }
    }

    let img: image::RgbaImage = image::ImageBuffer::from_raw(width, height, pixel_data).unwrap();
    img.save(path).expect("Failed to save test image");
}

#[test]
fn test_full_pipeline_two_color_image() {
    let test_img = temp_path("pm_it_halves.png");
    let catalog_path = write_catalog("pm_it_halves_catalog.json");
    create_test_png(&test_img, 60, 40, "halves");

    let catalog = load_catalog(&catalog_path).expect("Failed to load catalog");
    assert_eq!(catalog.len(), 5);

    let options = AnalysisOptions {
        seed: Some(1),
        ..Default::default()
    };
    let result = analyze_file(&test_img, &catalog, &options).expect("Failed to analyze");

    assert_eq!(result.dominant_colors.len(), 5);
    let hexes: Vec<&str> = result.dominant_colors.iter().map(|c| c.hex.as_str()).collect();
    assert!(hexes.contains(&"#FF0000"), "got {:?}", hexes);
    assert!(hexes.contains(&"#0000FF"), "got {:?}", hexes);

    // Red and blue palettes both match exactly one image color per palette color.
    assert_eq!(result.palettes.len(), 5);
    let top_two: Vec<&str> = result.palettes[..2]
        .iter()
        .map(|p| p.palette.name.as_str())
        .collect();
    assert!(top_two.contains(&"ff0000ff4000c00000ff2000"));
    assert!(top_two.contains(&"0000ff0040ff0000c02020ff"));
    for pair in result.palettes.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }

    let _ = fs::remove_file(&test_img);
    let _ = fs::remove_file(&catalog_path);
}

#[test]
fn test_transparent_pixels_are_ignored() {
    let test_img = temp_path("pm_it_red_on_clear.png");
    create_test_png(&test_img, 40, 40, "red_on_clear");

    let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
    let options = AnalysisOptions {
        seed: Some(2),
        ..Default::default()
    };
    let result = analyze_file(&test_img, &catalog, &options).expect("Failed to analyze");

    // The green area is fully transparent, so only the red strip is seen.
    assert!(result.dominant_colors.iter().all(|c| c.hex == "#DC0A0A"));
    assert_eq!(result.palettes[0].palette.name, "ff0000ff4000c00000ff2000");

    let _ = fs::remove_file(&test_img);
}

#[test]
fn test_fully_transparent_image() {
    let test_img = temp_path("pm_it_transparent.png");
    create_test_png(&test_img, 2, 2, "transparent");

    let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
    let result = analyze_file(&test_img, &catalog, &AnalysisOptions::default())
        .expect("Failed to analyze");
    assert!(result.dominant_colors.is_empty());
    assert!(result.palettes.is_empty());

    let _ = fs::remove_file(&test_img);
}

#[test]
fn test_large_image_is_downscaled_and_capped() {
    let test_img = temp_path("pm_it_noise.png");
    create_test_png(&test_img, 900, 300, "noise");

    let image_data = load_image(&test_img, 420).expect("Failed to load image");
    assert_eq!((image_data.width, image_data.height), (420, 140));

    let mut rng = StdRng::seed_from_u64(3);
    let samples = sample_pixels(&image_data.pixels, 6000, &mut rng);
    assert_eq!(samples.len(), 6000);

    let colors = kmeans(&samples, 5, 12, &mut rng);
    assert_eq!(colors.len(), 5);

    let _ = fs::remove_file(&test_img);
}

#[test]
fn test_top_n_limits_output() {
    let test_img = temp_path("pm_it_top_n.png");
    create_test_png(&test_img, 16, 16, "noise");

    let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
    let options = AnalysisOptions {
        top_n: 2,
        seed: Some(4),
        ..Default::default()
    };
    let result = analyze_file(&test_img, &catalog, &options).expect("Failed to analyze");
    assert_eq!(result.palettes.len(), 2);

    let _ = fs::remove_file(&test_img);
}

#[test]
fn test_missing_catalog_is_fatal() {
    let err = load_catalog(&temp_path("pm_it_does_not_exist.json")).unwrap_err();
    assert!(err.to_string().contains("failed to load palette catalog"));
}

#[test]
fn test_invalid_options_rejected() {
    let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
    let options = AnalysisOptions {
        max_samples: 0,
        ..Default::default()
    };
    assert!(analyze_file(&temp_path("pm_it_unused.png"), &catalog, &options).is_err());
}

#[test]
fn test_process_image_with_raw_buffer() {
    let mut bytes = Vec::new();
    for i in 0..10u8 {
        bytes.extend_from_slice(&[i * 25, 255 - i * 25, 128, 255]);
    }
    let image_data = palette_match::ImageData::from_rgba_bytes(10, 1, &bytes).unwrap();
    assert_eq!(image_data.pixels[1], RGBA8::new(25, 230, 128, 255));

    let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
    let options = AnalysisOptions {
        num_colors: 10,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(5);
    let result = process_image(&image_data, &catalog, &options, &mut rng);

    // Ten samples with k = 10: the pixels come back unchanged and in order.
    let hexes: Vec<String> = result.dominant_colors.iter().map(|c| c.hex.clone()).collect();
    let expected: Vec<String> = image_data.pixels.iter().map(|p| rgb_to_hex(p.rgb())).collect();
    assert_eq!(hexes, expected);
    for hex in &hexes {
        assert_eq!(rgb_to_hex(hex_to_rgb(hex)), *hex);
    }
}

#[test]
fn test_swatch_sheet_written() {
    let test_img = temp_path("pm_it_swatch.png");
    let test_svg = temp_path("pm_it_swatch.svg");
    create_test_png(&test_img, 30, 30, "halves");

    let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
    let options = AnalysisOptions {
        seed: Some(6),
        ..Default::default()
    };
    let result = analyze_file(&test_img, &catalog, &options).expect("Failed to analyze");
    generate_swatch_svg(&result, &test_svg).expect("Failed to write SVG");

    let svg_content = fs::read_to_string(&test_svg).expect("Failed to read SVG");
    assert!(svg_content.contains("<svg"));
    assert!(svg_content.contains("#FF0000"));
    assert!(svg_content.contains("Paper"));

    let _ = fs::remove_file(&test_img);
    let _ = fs::remove_file(&test_svg);
}
