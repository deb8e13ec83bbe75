//! Command line tool for converting NRRD (or NRRD header and raw image)
//! files to NIfTI-1 images. The output file has the same name as the
//! input with a ".nii" or ".nii.gz" extension.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "nrrd2nii",
    about = "Convert a nrrd (or nhdr + raw) image file to a NIfTI-1 image"
)]
struct Cli {
    /// Input nrrd or nhdr file
    #[arg(short = 'n', long = "nrrd", value_name = "PATH")]
    nrrd: PathBuf,

    /// Gzip the output file
    #[arg(short = 'z', long = "gzip")]
    gzip: bool,
}

fn main() {
    // a bare invocation prints usage rather than a missing-argument error
    if std::env::args().len() <= 1 {
        eprintln!("{}", Cli::command().render_help());
        process::exit(1);
    }
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    match nrrd2nii::convert(&cli.nrrd, cli.gzip) {
        Ok(out_file) => println!("{}", out_file.display()),
        Err(e) => {
            eprintln!("nrrd2nii: {}", e);
            process::exit(1);
        }
    }
}
