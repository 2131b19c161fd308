// src/main.rs
// Command-line converter between Infiniium BIN and CSV waveform files

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use agbin::{binary, csv, scaling, WaveformCollection};

fn print_usage() {
    eprintln!("Usage: agbin <command> <file> [output]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  info <file.bin>            Display BIN file information");
    eprintln!("  bin2csv <file> [output]    Convert BIN to CSV");
    eprintln!("  csv2bin <file> [output]    Convert CSV to BIN");
    eprintln!();
    eprintln!("If no output name is given it is derived from the input by");
    eprintln!("swapping the extension (.bin <-> .csv).");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  agbin info capture.bin");
    eprintln!("  agbin bin2csv capture.bin");
    eprintln!("  agbin csv2bin edited.csv rebuilt.bin");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];
    let input_file = &args[2];

    match command.as_str() {
        "info" => {
            let collection = load_bin(input_file);
            print_file_info(input_file, &collection);
        }

        "bin2csv" => {
            let output_file = output_name(&args, input_file, "bin", "csv");
            let collection = load_bin(input_file);
            let text = csv::render(&collection);

            if let Err(e) = fs::write(&output_file, text) {
                eprintln!("Error writing CSV file '{}': {}", output_file.display(), e);
                process::exit(1);
            }

            log::info!(
                "converted {} waveform(s) from {} to {}",
                collection.waveforms.len(),
                input_file,
                output_file.display()
            );
            println!(
                "Successfully converted {} to {}",
                input_file,
                output_file.display()
            );
        }

        "csv2bin" => {
            let output_file = output_name(&args, input_file, "csv", "bin");
            let text = match fs::read_to_string(input_file) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error reading CSV file '{}': {}", input_file, e);
                    process::exit(1);
                }
            };

            let collection = match csv::parse(&text) {
                Ok(collection) => collection,
                Err(e) => {
                    eprintln!("Error parsing CSV file '{}': {}", input_file, e);
                    process::exit(1);
                }
            };

            let image = match binary::serialize(&collection) {
                Ok(image) => image,
                Err(e) => {
                    eprintln!("Error serializing '{}': {}", input_file, e);
                    process::exit(1);
                }
            };

            if let Err(e) = fs::write(&output_file, image) {
                eprintln!("Error writing BIN file '{}': {}", output_file.display(), e);
                process::exit(1);
            }

            log::info!(
                "converted {} waveform(s) from {} to {}",
                collection.waveforms.len(),
                input_file,
                output_file.display()
            );
            println!(
                "Successfully converted {} to {}",
                input_file,
                output_file.display()
            );
        }

        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            print_usage();
            process::exit(1);
        }
    }
}

fn load_bin(input_file: &str) -> WaveformCollection {
    let bytes = match fs::read(input_file) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading BIN file '{}': {}", input_file, e);
            process::exit(1);
        }
    };

    match binary::parse(&bytes) {
        Ok(collection) => collection,
        Err(e) => {
            eprintln!("Error parsing BIN file '{}': {}", input_file, e);
            process::exit(1);
        }
    }
}

fn output_name(args: &[String], input_file: &str, from_ext: &str, to_ext: &str) -> PathBuf {
    if let Some(name) = args.get(3) {
        return PathBuf::from(name);
    }
    match derive_output_name(input_file, from_ext, to_ext) {
        Ok(name) => name,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Swap the input extension. Refusing unexpected extensions guards against
/// deriving a name that overwrites the input.
fn derive_output_name(
    input_file: &str,
    from_ext: &str,
    to_ext: &str,
) -> Result<PathBuf, String> {
    let path = Path::new(input_file);
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case(from_ext) => Ok(path.with_extension(to_ext)),
        _ => Err(format!(
            "input '{}' does not have the expected .{} extension; pass an output name explicitly",
            input_file, from_ext
        )),
    }
}

fn print_file_info(input_file: &str, collection: &WaveformCollection) {
    println!("BIN File Information");
    println!("====================");
    println!();
    println!("File: {}", input_file);
    println!("Version: {}", collection.version);
    println!("Number of waveforms: {}", collection.waveforms.len());
    println!();

    for (wx, wf) in collection.waveforms.iter().enumerate() {
        println!("Waveform {} ({}):", wx, wf.label);
        println!("  Type: {}", wf.waveform_type);
        println!("  Points: {}", wf.points);
        println!("  Buffers: {}", wf.buffers.len());
        println!("  Count: {}", wf.count);
        println!("  X units: {}", wf.x_units);
        println!("  Y units: {}", wf.y_units);
        println!("  Sample interval: {:.3e} s", wf.x_increment);
        println!("  Start time: {:.6e} s", wf.x_origin);
        let duration = wf.points as f64 * wf.x_increment;
        println!("  Duration: {:.6e} s", duration);
        if !wf.date.is_empty() || !wf.time.is_empty() {
            println!("  Captured: {} {}", wf.date, wf.time);
        }
        if !wf.frame.is_empty() {
            println!("  Frame: {}", wf.frame);
        }
        if wf.segment_index != 0 {
            println!("  Segment: {} (time tag {:.6e} s)", wf.segment_index, wf.time_tag);
        }

        for (bx, buf) in wf.buffers.iter().enumerate() {
            let mut min_v = f64::INFINITY;
            let mut max_v = f64::NEG_INFINITY;
            for i in 0..buf.samples.len() {
                if let Some((_, v)) = scaling::to_physical(wf, buf, i) {
                    min_v = min_v.min(v);
                    max_v = max_v.max(v);
                }
            }
            print!(
                "  Buffer {}: {:?}, {:?} encoding",
                bx,
                buf.buffer_type,
                buf.samples.encoding()
            );
            if buf.samples.is_empty() {
                println!();
            } else {
                println!(
                    ", range {:.3} to {:.3} ({:.3} peak-to-peak)",
                    min_v,
                    max_v,
                    max_v - min_v
                );
            }
        }
        println!();
    }
}
