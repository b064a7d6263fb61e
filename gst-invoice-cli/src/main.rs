use std::{collections::HashSet, io::Write};

use clap::Parser;
use env_logger::Env;
use gst_invoice::{Invoice, RenderOptions, error::AddContext, generate_pdf};

use crate::cli::{Cli, claim_file_name, pdf_file_name};

mod cli;

fn write_invoice_pdf(
    invoice: &Invoice,
    options: &RenderOptions,
    cli: &Cli,
    taken: &mut HashSet<String>,
) -> Result<(), gst_invoice::Error> {
    let data = generate_pdf(invoice, options)
        .add_context("generating pdf data from invoice")
        .add_context(&format!("invoice number: {}", invoice.info().invoice_no()))?;
    match &cli.out {
        Some(out) => {
            let path = out.join(claim_file_name(&pdf_file_name(invoice), taken));
            if let Err(e) = std::fs::write(&path, &data) {
                log::error!(
                    "Failed to write invoice '{}' to '{}': {e}",
                    invoice.info().invoice_no(),
                    &path.to_string_lossy()
                );
                write_pdf_to_stdout(&data)
            } else {
                log::info!("wrote '{}'", path.to_string_lossy());
                Ok(())
            }
        }
        None => write_pdf_to_stdout(&data),
    }
}

fn write_pdf_to_stdout(data: &[u8]) -> Result<(), gst_invoice::Error> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(data)
        .map_err(gst_invoice::Error::from)
        .add_context("writing invoice pdf to stdout")?;
    stdout
        .flush()
        .map_err(gst_invoice::Error::from)
        .add_context("flushing stdout")
        .add_context("printing to stdout")?;
    Ok(())
}

fn main() -> Result<(), gst_invoice::Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let options = cli.render_options();
    let invoices = cli
        .get_invoices()
        .add_context("deserializing invoices from cli")?;
    let mut taken = HashSet::new();
    for invoice in &invoices {
        write_invoice_pdf(invoice, &options, &cli, &mut taken)?;
    }
    Ok(())
}
