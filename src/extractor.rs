use crate::errors::{AppError, AppResult};
use crate::models::DocumentText;
use lopdf::Document;
use std::io::{Cursor, Read};
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Extracts the text of one market's report from the city reports archive.
///
/// The first member whose lowercased name starts with `prefix` and ends with
/// `extension` is selected (first match, not best match). Its pages are read
/// in order, pages without text are skipped, and the rest are joined with
/// newlines.
///
/// # Returns
///
/// - [`DocumentText::Found`] with the joined text, possibly empty
/// - [`DocumentText::NotFound`] when no member matches
///
/// # Errors
///
/// Returns `Archive` if the archive or the selected member cannot be read, and
/// `Document` if the member is not a readable PDF or a page's content is
/// corrupt.
///
/// # Example
///
/// ```no_run
/// use sipsa_cli::extractor;
/// use sipsa_cli::models::DocumentText;
///
/// # fn example(zip_bytes: &[u8]) -> Result<(), sipsa_cli::errors::AppError> {
/// match extractor::extract_document_text(zip_bytes, "bogota", ".pdf")? {
///     DocumentText::Found(text) => println!("{text}"),
///     DocumentText::NotFound => println!("No Bogotá report in this bulletin"),
/// }
/// # Ok(())
/// # }
/// ```
pub fn extract_document_text(
    bytes: &[u8],
    prefix: &str,
    extension: &str,
) -> AppResult<DocumentText> {
    let Some((name, pdf_bytes)) = read_matching_member(bytes, prefix, extension)? else {
        warn!(prefix = prefix, "No matching document in archive");
        return Ok(DocumentText::NotFound);
    };

    let text = pdf_text(&pdf_bytes).map_err(|e| match e {
        AppError::Document(msg) => AppError::Document(format!("{name}: {msg}")),
        other => other,
    })?;

    info!(
        document = %name,
        chars = text.chars().count(),
        "Document text extracted"
    );

    Ok(DocumentText::Found(text))
}

/// Reads the first matching archive member into memory.
///
/// The archive and member handles are dropped before returning on every path.
fn read_matching_member(
    bytes: &[u8],
    prefix: &str,
    extension: &str,
) -> AppResult<Option<(String, Vec<u8>)>> {
    let prefix = prefix.to_lowercase();
    let extension = extension.to_lowercase();

    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Archive(format!("Failed to read ZIP archive: {e}")))?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|e| {
            AppError::Archive(format!("Failed to read entry {i} from ZIP archive: {e}"))
        })?;

        if file.is_dir() {
            continue;
        }

        let name = file.name().to_string();
        let lower = name.to_lowercase();
        if !(lower.starts_with(&prefix) && lower.ends_with(&extension)) {
            continue;
        }

        debug!(member = %name, size_bytes = file.size(), "Selected archive member");

        // The declared size is untrusted; let the buffer grow with the data.
        let mut content = Vec::new();
        file.read_to_end(&mut content).map_err(|e| {
            AppError::Archive(format!("Failed to read {name} from ZIP archive: {e}"))
        })?;

        return Ok(Some((name, content)));
    }

    Ok(None)
}

/// Concatenates the extractable text of every page of a PDF.
fn pdf_text(pdf_bytes: &[u8]) -> AppResult<String> {
    let document = Document::load_mem(pdf_bytes)
        .map_err(|e| AppError::Document(format!("Failed to load PDF: {e}")))?;

    let pages = document.get_pages();
    let mut texts = Vec::with_capacity(pages.len());

    for page_number in pages.keys() {
        let text = document.extract_text(&[*page_number]).map_err(|e| {
            AppError::Document(format!("Failed to extract text from page {page_number}: {e}"))
        })?;

        let text = text.trim_end();
        if text.trim().is_empty() {
            debug!(page = page_number, "Page has no text, skipping");
            continue;
        }
        texts.push(text.to_string());
    }

    debug!(
        pages = pages.len(),
        pages_with_text = texts.len(),
        "PDF pages read"
    );

    Ok(texts.join("\n"))
}
