// RustPixel
// copyright zipxing@hotmail.com 2022～2025

/// pcx-inspect, checks the 8-bit pcx files the 2d layer loads.
///
/// Usage:
/// pcx-inspect pics/colormap.pcx
/// pcx-inspect pics/colormap.pcx --palette
/// pcx-inspect pics/conchars.pcx --rgba conchars.rgba
/// pcx-inspect pics/conchars.pcx --rgba conchars.rgba --colormap pics/colormap.pcx
/// pcx-inspect pics/conchars.pcx --rgba conchars.rgba --config draw2d.toml
///
/// With --config the log goes to the configured file and, unless --colormap
/// is given, the palette is the colormap under the configured asset root.
///
/// The rgba output is raw, tightly packed and row-major, using the
/// colormap rules (index 255 gets alpha 0).
///
use clap::{Arg, ArgAction, ArgMatches, Command};
use pixel_draw2d::asset::AssetManager;
use pixel_draw2d::log::init_log_from;
use pixel_draw2d::render::palette::Palette;
use pixel_draw2d::render::pcx::{self, Pcx};
use pixel_draw2d::Draw2dConfig;
use std::fs;
use std::process;

fn make_cli() -> Command {
    Command::new("pcx-inspect")
        .about("print header and palette of a pcx file, convert it to raw rgba")
        .arg(Arg::new("file").required(true))
        .arg(
            Arg::new("palette")
                .short('p')
                .long("palette")
                .help("dump the 256 palette entries")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("rgba")
                .short('o')
                .long("rgba")
                .value_name("OUT")
                .help("write the image as raw rgba bytes"),
        )
        .arg(
            Arg::new("colormap")
                .short('c')
                .long("colormap")
                .value_name("PCX")
                .help("take the palette from this file instead of the input"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("TOML")
                .help("draw2d config: log setup and asset root"),
        )
}

fn read_pcx(path: &str) -> Result<Pcx, String> {
    let data = fs::read(path).map_err(|e| format!("read {} error: {}", path, e))?;
    pcx::decode(&data).map_err(|e| format!("{}: {}", path, e))
}

fn print_header(path: &str, img: &Pcx) {
    let h = &img.header;
    println!("{}", path);
    println!("  version        {}", h.version);
    println!("  size           {}x{}", h.width, h.height);
    println!("  bytes_per_line {}", h.bytes_per_line);
    let mut used = [false; 256];
    for &p in &img.pixels {
        used[p as usize] = true;
    }
    println!(
        "  colors used    {}{}",
        used.iter().filter(|u| **u).count(),
        if used[255] { " (has transparent 255)" } else { "" }
    );
}

fn print_palette(pal: &Palette) {
    for i in 0..=255u8 {
        let [r, g, b, a] = pal.rgba(i);
        println!("  {:3}: {:02x}{:02x}{:02x} a={}", i, r, g, b, a);
    }
}

fn run(args: &ArgMatches) -> Result<(), String> {
    let path = args
        .get_one::<String>("file")
        .ok_or_else(|| "missing file".to_string())?;
    let cfg = match args.get_one::<String>("config") {
        Some(c) => {
            let cfg = Draw2dConfig::load(c).map_err(|e| e.to_string())?;
            init_log_from(&cfg).map_err(|e| e.to_string())?;
            Some(cfg)
        }
        None => None,
    };
    let img = read_pcx(path)?;
    print_header(path, &img);

    let pal = match (args.get_one::<String>("colormap"), &cfg) {
        (Some(cm), _) => Palette::from_colormap(&read_pcx(cm)?.palette),
        (None, Some(cfg)) => {
            Palette::load(&mut AssetManager::from_config(cfg)).map_err(|e| e.to_string())?
        }
        (None, None) => Palette::from_colormap(&img.palette),
    };
    if args.get_flag("palette") {
        print_palette(&pal);
    }
    if let Some(out) = args.get_one::<String>("rgba") {
        let rgba = pal.to_rgba8(&img.pixels);
        fs::write(out, &rgba).map_err(|e| format!("write {} error: {}", out, e))?;
        println!("wrote {} bytes to {}", rgba.len(), out);
    }
    Ok(())
}

fn main() {
    let args = make_cli().get_matches();
    if let Err(e) = run(&args) {
        eprintln!("pcx-inspect: {}", e);
        process::exit(1);
    }
}
