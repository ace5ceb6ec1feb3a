//! In-place progress line for multi-page fetches

use std::io::{self, Write};

/// Text of the progress line. The page total is only shown once known to exceed one.
pub fn page_progress_text(page: u32, pages: u32) -> String {
    if pages > 1 {
        format!("Fetching page {} of {}", page, pages)
    } else {
        format!("Fetching page {}", page)
    }
}

/// Rewrite the current console line with the fetch progress. Returns the width written.
pub fn display_page_progress<W: Write>(out: &mut W, page: u32, pages: u32) -> io::Result<usize> {
    let text = page_progress_text(page, pages);
    write!(out, "\r{}", text)?;
    out.flush()?;
    Ok(text.len())
}

/// Blank a progress line of the given width and return the cursor to its start
pub fn finish_progress<W: Write>(out: &mut W, width: usize) -> io::Result<()> {
    if width == 0 {
        return Ok(());
    }
    write!(out, "\r{}\r", " ".repeat(width))?;
    out.flush()
}
