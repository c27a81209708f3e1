// UI layer: reads the link (argument or prompt), drives the
// classify -> shorten -> stats sequence and prints one line per outcome.

use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::link;

/// Entry point of the interactive flow. Errors from the VK API are printed,
/// not returned; only local failures (reading input, client setup) bubble
/// up. Writes to stdout are best effort.
pub fn run(config: &Config, url_arg: Option<String>) -> Result<()> {
    let raw = match url_arg {
        Some(url) => url,
        None if io::stdin().is_terminal() => Input::<String>::new()
            .with_prompt("Вставь ссылку")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read link from terminal")?,
        None => read_link(io::stdin().lock()).context("Failed to read link from stdin")?,
    };

    let mut stdout = io::stdout().lock();
    if raw.trim().is_empty() {
        ignore_write_error(writeln!(stdout, "Ошибка: пустая ссылка."));
        return Ok(());
    }

    let api = ApiClient::new(config).context("Failed to build HTTP client")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    print_link(&api, &raw, &mut stdout, &spinner);
    Ok(())
}

/// First line of piped input, trimmed. Empty when the pipe is empty.
pub fn read_link<R: BufRead>(mut reader: R) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// `process_link` for the real stdout: a closed or broken output stream is
/// logged and otherwise ignored, so it never turns into a failing exit.
pub fn print_link<W: Write>(api: &ApiClient, raw: &str, out: &mut W, progress: &ProgressBar) {
    ignore_write_error(process_link(api, raw, out, progress));
}

fn ignore_write_error(result: io::Result<()>) {
    if let Err(err) = result {
        debug!(error = %err, "could not write to stdout");
    }
}

/// Run the three steps for one link and write the result (or the first
/// failure) to `out`. Lines printed before a failure stay printed.
pub fn process_link<W: Write>(
    api: &ApiClient,
    raw: &str,
    out: &mut W,
    progress: &ProgressBar,
) -> io::Result<()> {
    let url = link::normalize(raw);
    debug!(%url, "normalized input");

    let outcome = resolve(api, &url, out, progress);
    progress.finish_and_clear();

    match outcome {
        Ok(Ok(clicks)) => writeln!(out, "Количество переходов по ссылке: {}", clicks),
        Ok(Err(err)) => {
            debug!(error = ?err, "link processing failed");
            writeln!(out, "{}", describe_error(&err))
        }
        Err(io_err) => Err(io_err),
    }
}

/// The orchestration itself. The outer `Result` is for writing to `out`,
/// the inner one for the API.
fn resolve<W: Write>(
    api: &ApiClient,
    url: &str,
    out: &mut W,
    progress: &ProgressBar,
) -> io::Result<Result<u64, ApiError>> {
    let short_url = if link::is_short_link(url) {
        url.to_string()
    } else {
        progress.set_message("Сокращаю ссылку...");
        match api.shorten(url) {
            Ok(short) => {
                progress.suspend(|| writeln!(out, "Сокращённая ссылка: {}", short))?;
                short
            }
            Err(err) => return Ok(Err(err)),
        }
    };

    progress.set_message("Получаю статистику...");
    Ok(api.get_click_count(&short_url))
}

/// One localized line per failure category.
pub fn describe_error(err: &ApiError) -> String {
    match err {
        ApiError::Http { status } => format!("HTTP ошибка: {}", status),
        ApiError::Connection(_) => {
            "Ошибка соединения: проверь URL или подключение к интернету.".to_string()
        }
        ApiError::Timeout(_) => "Превышено время ожидания ответа от сервера.".to_string(),
        ApiError::Api { message, .. } => format!("Ошибка от VK API: {}", message),
        ApiError::Parse(_) | ApiError::MissingField(_) | ApiError::ClickOverflow => {
            format!("Некорректный ответ сервера: {}", err)
        }
        ApiError::InvalidLink(url) => format!("Ошибка: в ссылке нет ключа: {}", url),
        ApiError::Request(_) => format!("Неизвестная ошибка: {}", err),
    }
}
