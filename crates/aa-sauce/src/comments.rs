//! Optional comment block preceding the SAUCE trailer.

use aa_core::{CoreError, SupportedEncoding};

/// Magic bytes opening a comment block.
pub const COMMENT_ID: &[u8; 5] = b"COMNT";

/// Width of one comment line in bytes.
pub const COMMENT_LINE_SIZE: usize = 64;

/// Size in bytes of a block holding `count` lines.
#[inline(always)]
#[must_use]
pub const fn block_size(count: u8) -> usize {
    count as usize * COMMENT_LINE_SIZE + COMMENT_ID.len()
}

/// Detach the comment block from the end of `body`.
///
/// Never fails: when `count` is zero, the body is too short, the marker is
/// missing or a line does not decode, no comments are returned and `body`
/// is handed back untouched.
///
/// # Example
/// ```
/// use aa_core::SupportedEncoding;
/// use aa_sauce::comments::{split_comments, write_comments};
/// let mut data = b"art".to_vec();
/// data.extend(write_comments(&["hello".to_string()], SupportedEncoding::Ascii).unwrap());
/// let (comments, body) = split_comments(&data, 1, SupportedEncoding::Ascii);
/// assert_eq!(comments, ["hello"]);
/// assert_eq!(body, b"art");
/// ```
#[must_use]
pub fn split_comments(
    body: &[u8],
    count: u8,
    encoding: SupportedEncoding,
) -> (Vec<String>, &[u8]) {
    if count == 0 {
        return (Vec::new(), body);
    }
    let size = block_size(count);
    let Some(split) = body.len().checked_sub(size) else {
        log::debug!(
            "Bloc de commentaires tronqué : {size} octets attendus, {} disponibles",
            body.len()
        );
        return (Vec::new(), body);
    };

    let (rest, block) = body.split_at(split);
    match parse_block(block, encoding) {
        Ok(comments) => (comments, rest),
        Err(reason) => {
            log::debug!("Bloc de commentaires ignoré : {reason}");
            (Vec::new(), body)
        }
    }
}

fn parse_block(block: &[u8], encoding: SupportedEncoding) -> Result<Vec<String>, String> {
    let Some(lines) = block.strip_prefix(COMMENT_ID.as_slice()) else {
        return Err(format!("marqueur invalide {:?}", &block[..COMMENT_ID.len().min(block.len())]));
    };
    lines
        .chunks(COMMENT_LINE_SIZE)
        .map(|line| {
            let end = line.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            encoding.decode(&line[..end]).map_err(|e| e.to_string())
        })
        .collect()
}

/// Build a comment block: marker then one NUL-padded 64-byte line per comment.
///
/// Lines longer than 64 bytes are truncated. An empty slice yields an empty block.
///
/// # Errors
/// Returns an error if a comment cannot be encoded with `encoding`.
pub fn write_comments(comments: &[String], encoding: SupportedEncoding) -> Result<Vec<u8>, CoreError> {
    if comments.is_empty() {
        return Ok(Vec::new());
    }
    let mut block = Vec::with_capacity(COMMENT_ID.len() + comments.len() * COMMENT_LINE_SIZE);
    block.extend_from_slice(COMMENT_ID);
    for comment in comments {
        let mut line = encoding.encode(comment)?;
        line.resize(COMMENT_LINE_SIZE, 0);
        block.extend_from_slice(&line);
    }
    Ok(block)
}
