// main.rs      gifmeta command
//
// Copyright (c) 2019-2020  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use gifmeta::block::{ColorTable, DisposalMethod, GifImage, LogicalScreenDesc};
use gifmeta::Gif;
use std::error::Error;
use std::ffi::OsStr;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Crate version
const VERSION: &'static str = std::env!("CARGO_PKG_VERSION");

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let mut out = StandardStream::stdout(ColorChoice::Always);
    match create_app().get_matches().subcommand() {
        ("show", Some(matches)) => show(&mut out, matches)?,
        ("info", Some(matches)) => info(&mut out, matches)?,
        _ => panic!(),
    }
    out.reset()?;
    Ok(())
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("gifmeta")
        .version(VERSION)
        .setting(AppSettings::GlobalVersion)
        .about("GIF metadata utility")
        .setting(AppSettings::ArgRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("show")
                .about("Show GIF image table")
                .arg(
                    Arg::with_name("files")
                        .required(true)
                        .min_values(1)
                        .help("input file(s)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Show detailed block info for GIF file(s)")
                .arg(
                    Arg::with_name("verbose")
                        .short("v")
                        .long("verbose")
                        .help("list all color table entries"),
                )
                .arg(
                    Arg::with_name("files")
                        .required(true)
                        .min_values(1)
                        .help("input file(s)"),
                ),
        )
}

/// Handle show subcommand
fn show(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let values = matches.values_of_os("files").unwrap();
    for path in values {
        show_file(out, path)?;
    }
    Ok(())
}

/// Show a table of images for one GIF file
fn show_file(
    out: &mut StandardStream,
    path: &OsStr,
) -> Result<(), Box<dyn Error>> {
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(Color::Magenta));
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    let gif = Gif::from_path(path)?;
    let image_digits = digits(gif.images.len()).max(3);
    let width = gif.logical_screen_desc.screen_width();
    let height = gif.logical_screen_desc.screen_height();
    let size_digits = 4.max(1 + digits(width) + digits(height));
    out.set_color(&magenta)?;
    writeln!(out, "{:?}", path)?;
    out.set_color(&bold)?;
    writeln!(out, "{}, images: {}", gif.version, gif.images.len())?;
    out.set_color(&yellow)?;
    write!(out, " {:>w$}", "Im#", w = image_digits)?;
    write!(out, "  Delay Disp")?;
    write!(out, " {:>w$}", "Size", w = size_digits)?;
    write!(out, " {:>w$}", "X,Y", w = size_digits)?;
    writeln!(out, " Clrs Trn {:>8}", "Bytes")?;
    let global_clr = if gif.logical_screen_desc.color_table_present() {
        gif.logical_screen_desc.color_table_len()
    } else {
        0
    };
    for (n, image) in gif.images.iter().enumerate() {
        show_image(
            image,
            out,
            width,
            height,
            global_clr,
            n,
            image_digits,
            size_digits,
        )?;
    }
    Ok(())
}

/// Show one row of the image table
fn show_image(
    image: &GifImage,
    out: &mut StandardStream,
    width: u16,
    height: u16,
    global_clr: usize,
    number: usize,
    image_digits: usize,
    size_digits: usize,
) -> Result<(), Box<dyn Error>> {
    let mut dflt = ColorSpec::new();
    dflt.set_fg(Some(Color::White));
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    let mut red = ColorSpec::new();
    red.set_fg(Some(Color::Red)).set_intense(true);
    out.set_color(&dflt)?;
    let interlaced = if image.image_desc.interlaced() {
        'i'
    } else {
        ' '
    };
    write!(out, "{}", interlaced)?;
    out.set_color(&bold)?;
    write!(out, "{:>w$}", number, w = image_digits)?;
    let d = if let Some(gc) = &image.graphic_control_ext {
        gc.delay_time_cs()
    } else {
        0
    };
    if d == 0 {
        out.set_color(&dflt)?;
    }
    write!(out, " {:6.2}", d as f32 / 100f32)?;
    let d = if let Some(gc) = &image.graphic_control_ext {
        match gc.disposal_method() {
            DisposalMethod::NoAction => "none",
            DisposalMethod::Keep => "keep",
            DisposalMethod::Background => "bg",
            DisposalMethod::Previous => "prev",
            _ => "res",
        }
    } else {
        "-"
    };
    out.set_color(match d {
        "none" | "-" => &dflt,
        "res" => &red,
        _ => &bold,
    })?;
    write!(out, " {:>4}", d)?;
    if width == image.image_desc.width() && height == image.image_desc.height()
    {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    write!(
        out,
        " {:>w$}",
        &format!("{}x{}", image.image_desc.width(), image.image_desc.height()),
        w = size_digits
    )?;
    if image.image_desc.left() == 0 && image.image_desc.top() == 0 {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    write!(
        out,
        " {:>w$}",
        &format!("{},{}", image.image_desc.left(), image.image_desc.top()),
        w = size_digits
    )?;
    let c = if image.image_desc.color_table_present() {
        image.image_desc.color_table_len()
    } else {
        0
    };
    if c > 0 {
        out.set_color(&bold)?;
        write!(out, "  {:3}", c)?;
    } else {
        out.set_color(&dflt)?;
        write!(out, " {:3}g", global_clr)?;
    }
    let tc = if let Some(gc) = &image.graphic_control_ext {
        if let Some(tc) = gc.transparent_color() {
            format!("{}", tc)
        } else {
            "-".to_string()
        }
    } else {
        "-".to_string()
    };
    if tc == "-" {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    write!(out, " {:>3}", tc)?;
    out.set_color(&dflt)?;
    writeln!(out, " {:>8}", image.image_data_sz)?;
    Ok(())
}

/// Handle info subcommand
fn info(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let verbose = matches.is_present("verbose");
    let values = matches.values_of_os("files").unwrap();
    for path in values {
        info_file(out, path, verbose)?;
    }
    Ok(())
}

/// Show detailed block info for one GIF file
fn info_file(
    out: &mut StandardStream,
    path: &OsStr,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(Color::Magenta));
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    let gif = Gif::from_path(path)?;
    out.set_color(&magenta)?;
    write!(out, "{:?}", path)?;
    out.set_color(&bold)?;
    writeln!(out, " ({})", gif.version)?;
    info_screen_desc(out, &gif.logical_screen_desc)?;
    if let Some(table) = &gif.global_color_table {
        info_color_table(out, "Global Color Table", table, verbose)?;
    }
    for image in &gif.images {
        info_image(out, image, verbose)?;
    }
    Ok(())
}

/// Show the logical screen descriptor
fn info_screen_desc(
    out: &mut StandardStream,
    desc: &LogicalScreenDesc,
) -> Result<(), Box<dyn Error>> {
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let mut dflt = ColorSpec::new();
    dflt.set_fg(Some(Color::White));
    out.set_color(&yellow)?;
    writeln!(out, "-- Logical Screen Descriptor")?;
    out.set_color(&dflt)?;
    writeln!(
        out,
        "screen size:        {}x{}",
        desc.screen_width(),
        desc.screen_height()
    )?;
    writeln!(out, "pixel aspect ratio: {}", desc.pixel_aspect_ratio())?;
    writeln!(out, "color resolution:   {}", desc.color_resolution())?;
    if desc.color_table_present() {
        writeln!(
            out,
            "global color table: {} colors, {}",
            desc.color_table_len(),
            sort_str(desc.color_table_sorted())
        )?;
        writeln!(out, "background index:   {}", desc.background_color_idx())?;
    } else {
        writeln!(out, "global color table: absent")?;
    }
    Ok(())
}

/// Show one color table
fn info_color_table(
    out: &mut StandardStream,
    title: &str,
    table: &ColorTable,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let mut dflt = ColorSpec::new();
    dflt.set_fg(Some(Color::White));
    out.set_color(&yellow)?;
    writeln!(out, "-- {}", title)?;
    out.set_color(&dflt)?;
    if verbose {
        for (i, c) in table.colors().chunks_exact(3).enumerate() {
            let mut swatch = ColorSpec::new();
            swatch.set_fg(Some(Color::Rgb(c[0], c[1], c[2])));
            write!(out, "{:3} ", i)?;
            out.set_color(&swatch)?;
            write!(out, "■")?;
            out.set_color(&dflt)?;
            writeln!(out, " ({}, {}, {})", c[0], c[1], c[2])?;
        }
    } else {
        writeln!(out, "{} entries", table.len())?;
    }
    Ok(())
}

/// Show detailed info for one image
fn info_image(
    out: &mut StandardStream,
    image: &GifImage,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let mut dflt = ColorSpec::new();
    dflt.set_fg(Some(Color::White));
    if let Some(gc) = &image.graphic_control_ext {
        out.set_color(&yellow)?;
        writeln!(out, "-- Graphic Control Extension")?;
        out.set_color(&dflt)?;
        let d = match gc.disposal_method() {
            DisposalMethod::NoAction => "none",
            DisposalMethod::Keep => "keep",
            DisposalMethod::Background => "background",
            DisposalMethod::Previous => "previous",
            _ => "reserved",
        };
        writeln!(out, "disposal method: {}", d)?;
        writeln!(out, "delay time:      {} ms", gc.delay_time_ms())?;
        match gc.transparent_color() {
            Some(idx) => writeln!(out, "transparency:    index {}", idx)?,
            None => writeln!(out, "transparency:    no")?,
        }
        writeln!(out, "user input:      {}", yes_no(gc.user_input()))?;
    }
    let desc = &image.image_desc;
    out.set_color(&yellow)?;
    writeln!(out, "-- Image Descriptor")?;
    out.set_color(&dflt)?;
    writeln!(
        out,
        "image:             {}x{} at ({}, {})",
        desc.width(),
        desc.height(),
        desc.left(),
        desc.top()
    )?;
    writeln!(out, "interlaced:        {}", yes_no(desc.interlaced()))?;
    if desc.color_table_present() {
        writeln!(
            out,
            "local color table: {} colors, {}",
            desc.color_table_len(),
            sort_str(desc.color_table_sorted())
        )?;
    } else {
        writeln!(out, "local color table: absent")?;
    }
    if let Some(table) = &image.local_color_table {
        info_color_table(out, "Local Color Table", table, verbose)?;
    }
    out.set_color(&yellow)?;
    writeln!(out, "-- Image Data")?;
    out.set_color(&dflt)?;
    writeln!(out, "{} bytes skipped", image.image_data_sz)?;
    Ok(())
}

/// Format a sorted flag
fn sort_str(sorted: bool) -> &'static str {
    if sorted {
        "sorted"
    } else {
        "unsorted"
    }
}

/// Format a yes/no flag
fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Calculate digits in a number
fn digits<T: Into<usize>>(v: T) -> usize {
    let v = v.into();
    match v {
        0..=9 => 1,
        10..=99 => 2,
        100..=999 => 3,
        1000..=9999 => 4,
        _ => 5,
    }
}
