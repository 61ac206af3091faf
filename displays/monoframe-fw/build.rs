//! Build script for monoframe-fw
//!
//! - Sets up linker search paths and link scripts for memory.x
//! - Validates display.toml and bakes it into the firmware as `CONFIG`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated display.toml values
struct DisplayToml {
    frame_rate: u8,
    addressing: &'static str,
    zoom: &'static str,
    text_size: u8,
    text_wrap: bool,
}

/// Validate display.toml and write `display_config.rs` into OUT_DIR
fn generate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a display.toml configuration file.        ║\n\
            ║  Please create one in the monoframe-fw directory.                ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let display = validate(&config);

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let generated = format!(
        "/// Display configuration from display.toml\n\
         pub const CONFIG: Config = Config {{\n    \
             frame_rate: {},\n    \
             addressing: Addressing::{},\n    \
             zoom: Zoom::{},\n    \
             text: TextConfig {{\n        \
                 size: {},\n        \
                 wrap: {},\n    \
             }},\n\
         }};\n",
        display.frame_rate, display.addressing, display.zoom, display.text_size, display.text_wrap,
    );
    fs::write(out_dir.join("display_config.rs"), generated).unwrap();

    println!("cargo:warning=display.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check every field; missing fields take the firmware defaults
fn validate(config: &toml::Value) -> DisplayToml {
    let mut errors = Vec::new();
    let mut display = DisplayToml {
        frame_rate: 60,
        addressing: "Checked",
        zoom: "X1",
        text_size: 1,
        text_wrap: false,
    };

    let section = |name: &str| config.get(name).and_then(|v| v.as_table());

    if let Some(table) = section("display") {
        match table.get("frame_rate") {
            Some(toml::Value::Integer(rate)) if (1..=255).contains(rate) => {
                display.frame_rate = *rate as u8;
            }
            Some(_) => errors.push("[display] frame_rate must be an integer 1-255".to_string()),
            None => {}
        }

        match table.get("addressing").map(|v| v.as_str()) {
            Some(Some("checked")) => display.addressing = "Checked",
            Some(Some("unchecked")) => display.addressing = "Unchecked",
            Some(_) => {
                errors.push("[display] addressing must be 'checked' or 'unchecked'".to_string())
            }
            None => {}
        }

        match table.get("zoom").map(|v| v.as_integer()) {
            Some(Some(1)) => display.zoom = "X1",
            Some(Some(2)) => display.zoom = "X2",
            Some(Some(4)) => display.zoom = "X4",
            Some(_) => errors.push("[display] zoom must be 1, 2 or 4".to_string()),
            None => {}
        }
    }

    if let Some(table) = section("text") {
        match table.get("size") {
            Some(toml::Value::Integer(size)) if (1..=8).contains(size) => {
                display.text_size = *size as u8;
            }
            Some(_) => errors.push("[text] size must be an integer 1-8".to_string()),
            None => {}
        }

        match table.get("wrap") {
            Some(toml::Value::Boolean(wrap)) => display.text_wrap = *wrap,
            Some(_) => errors.push("[text] wrap must be true or false".to_string()),
            None => {}
        }
    }

    if let Some(table) = config.as_table() {
        for key in table.keys() {
            if key != "display" && key != "text" {
                errors.push(format!("unknown section [{}]", key));
            }
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    display
}
