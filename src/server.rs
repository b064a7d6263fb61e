//! HTTP surface: `POST /generate-invoice`.
//!
//! The request body is parsed into a typed [`Invoice`], rendered to PDF on actix's blocking
//! thread pool, optionally written to disk, and returned as an attachment. Every failure is
//! logged with its full context chain and answered with an opaque plain-text 500.

use std::{env, fs, path::PathBuf};

use actix_web::{App, HttpResponse, HttpServer, http::header, middleware::Logger, web};

use crate::{
    Invoice, RenderOptions,
    error::{AddContext, Error},
    generate_pdf,
    layout::LayoutPreset,
};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_OUTPUT: &str = "invoice.pdf";

/// Server settings, read from `GST_INVOICE_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub render: RenderOptions,
    /// Overwritten with the latest PDF on every successful request
    pub output_path: Option<PathBuf>,
    /// Respond with the PDF itself rather than a confirmation message
    pub attach_pdf: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<ServerConfig, Error> {
        ServerConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<ServerConfig, Error> {
        let bind = lookup("GST_INVOICE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let static_dir =
            lookup("GST_INVOICE_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());
        let output_path = match lookup("GST_INVOICE_OUTPUT") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_OUTPUT)),
        };
        let attach_pdf = match lookup("GST_INVOICE_ATTACH") {
            Some(value) => parse_flag(&value).add_context("reading GST_INVOICE_ATTACH")?,
            None => true,
        };
        let preset = match lookup("GST_INVOICE_LAYOUT") {
            Some(value) => value
                .parse::<LayoutPreset>()
                .add_context("reading GST_INVOICE_LAYOUT")?,
            None => LayoutPreset::default(),
        };
        Ok(ServerConfig {
            bind,
            render: RenderOptions::new(static_dir).with_layout(preset.config()),
            output_path,
            attach_pdf,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::invalid_input(format!("'{other}' is not a boolean"))),
    }
}

fn build_invoice_pdf(config: &ServerConfig, body: &[u8]) -> Result<Vec<u8>, Error> {
    let invoice = Invoice::from_json(body).add_context("reading request body")?;
    let pdf = generate_pdf(&invoice, &config.render)?;
    if let Some(path) = &config.output_path {
        fs::write(path, &pdf)
            .map_err(Error::from)
            .add_context(&format!("writing pdf to '{}'", path.display()))?;
    }
    log::info!(
        "generated invoice '{}' ({} bytes)",
        invoice.info().invoice_no(),
        pdf.len()
    );
    Ok(pdf)
}

fn failure() -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type("text/plain; charset=utf-8")
        .body("Error generating invoice")
}

/// POST /generate-invoice
pub async fn generate_invoice(config: web::Data<ServerConfig>, body: web::Bytes) -> HttpResponse {
    let config = config.into_inner();
    let settings = config.clone();
    let result = web::block(move || {
        build_invoice_pdf(&settings, &body).map_err(|e| e.to_string())
    })
    .await;

    match result {
        Ok(Ok(pdf)) if config.attach_pdf => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=invoice.pdf",
            ))
            .body(pdf),
        Ok(Ok(_)) => {
            let message = match &config.output_path {
                Some(path) => format!("Invoice generated and saved to {}", path.display()),
                None => String::from("Invoice generated"),
            };
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(message)
        }
        Ok(Err(e)) => {
            log::error!("Error generating invoice: {e}");
            failure()
        }
        Err(e) => {
            log::error!("Error generating invoice: blocking task failed: {e}");
            failure()
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/generate-invoice").route(web::post().to(generate_invoice)));
}

pub async fn run(settings: ServerConfig) -> std::io::Result<()> {
    let bind = settings.bind.clone();
    let data = web::Data::new(settings);

    log::info!("Starting server at http://{bind}");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(config)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::Path};

    use super::*;
    use crate::error::ErrorKind;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.render.assets_dir, Path::new(DEFAULT_STATIC_DIR));
        assert_eq!(config.output_path.as_deref(), Some(Path::new(DEFAULT_OUTPUT)));
        assert!(config.attach_pdf);
        assert_eq!(config.render.layout.preset, LayoutPreset::Compact);
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("GST_INVOICE_BIND", "0.0.0.0:8080"),
            ("GST_INVOICE_STATIC_DIR", "/srv/static"),
            ("GST_INVOICE_OUTPUT", ""),
            ("GST_INVOICE_ATTACH", "no"),
            ("GST_INVOICE_LAYOUT", "wide"),
        ]))
        .unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.render.assets_dir, Path::new("/srv/static"));
        assert!(config.output_path.is_none());
        assert!(!config.attach_pdf);
        assert_eq!(config.render.layout.preset, LayoutPreset::Wide);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ServerConfig::from_lookup(lookup(&[("GST_INVOICE_ATTACH", "maybe")])).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidInput(_)));
        assert!(err.to_string().starts_with("reading GST_INVOICE_ATTACH"));

        let err = ServerConfig::from_lookup(lookup(&[("GST_INVOICE_LAYOUT", "tall")])).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidInput(_)));
    }
}
