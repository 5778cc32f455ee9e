use lazy_static::lazy_static;
use regex::Regex;

/// Longest piece of text the speech endpoint accepts per call.
pub const MAX_CHUNK_CHARS: usize = 100;

lazy_static! {
    static ref BOUNDARY_REGEX: Regex = Regex::new(
        r"(?x)
        [!?…\n。、！？；：]+ |     # always a boundary
        [.,;:]+(?:\s+|$)         # ASCII marks only before whitespace, keeps 3.5 and 10:30 whole
        "
    )
    .unwrap();
    static ref SPEAKABLE_REGEX: Regex = Regex::new(r"[\p{L}\p{N}]").unwrap();
}

/// Splits text into speakable chunks of at most `max_chars` characters,
/// preferring punctuation, then spaces, then a hard cut.
pub fn split(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut last_end = 0;

    for m in BOUNDARY_REGEX.find_iter(text) {
        push_minimized(&text[last_end..m.end()], max_chars, &mut chunks);
        last_end = m.end();
    }

    if last_end < text.len() {
        push_minimized(&text[last_end..], max_chars, &mut chunks);
    }

    chunks
}

fn push_minimized(segment: &str, max_chars: usize, chunks: &mut Vec<String>) {
    let mut rest = segment.trim();

    while rest.chars().count() > max_chars {
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let cut = match rest[..limit].rfind(' ') {
            Some(i) if i > 0 => i,
            _ => limit,
        };
        push_chunk(&rest[..cut], chunks);
        rest = rest[cut..].trim_start();
    }

    push_chunk(rest, chunks);
}

fn push_chunk(chunk: &str, chunks: &mut Vec<String>) {
    let chunk = chunk.trim();
    if SPEAKABLE_REGEX.is_match(chunk) {
        chunks.push(chunk.to_string());
    }
}
