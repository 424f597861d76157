use crate::conversation::Citation;

/// One marker position: every citation covering the same `(start, end)`
/// range shares a single insertion point.
#[derive(Debug)]
struct MarkerGroup {
    start: u64,
    end: u64,
    markers: Vec<String>,
}

/// Insert inline reference markers into `text` for the given citations.
///
/// Incomplete citations (missing offsets, empty `url` or `site_name`) are
/// silently dropped; the surrounding text is always emitted. `start_index`
/// of 0 is a valid anchor. A group marker is spliced in immediately after
/// its `end_index` without replacing any original character.
///
/// Groups are processed in descending `end_index` order. Offsets are
/// computed against the original text, and an insertion only shifts content
/// strictly after it, so later (smaller-offset) splice positions stay valid.
/// Any other order can corrupt neighbouring positions.
pub fn inline_citations(text: &str, citations: &[Citation]) -> String {
    let mut groups: Vec<MarkerGroup> = Vec::new();

    for citation in citations {
        let (Some(start), Some(end)) = (citation.start_index, citation.end_index) else {
            continue;
        };
        // A marker splices after the end offset; a zero end denotes an
        // empty span and is dropped.
        if end == 0 {
            continue;
        }
        let Some(url) = citation.url.as_deref().filter(|u| !u.is_empty()) else {
            continue;
        };
        let Some(site) = citation.site_name.as_deref().filter(|s| !s.is_empty()) else {
            continue;
        };

        let marker = format!("([{site}]({url}))");
        match groups
            .iter_mut()
            .find(|group| group.start == start && group.end == end)
        {
            Some(group) => group.markers.push(marker),
            None => groups.push(MarkerGroup {
                start,
                end,
                markers: vec![marker],
            }),
        }
    }

    // Stable sort keeps first-seen order for groups sharing an end offset
    groups.sort_by(|a, b| b.end.cmp(&a.end));

    let mut out = text.to_owned();
    for group in &groups {
        let at = splice_offset(text, group.end);
        out.insert_str(at, &format!(" {}", group.markers.join(" ")));
    }
    out
}

/// Clamp a byte offset into a valid splice position: never past the end,
/// never inside a multi-byte character.
fn splice_offset(text: &str, end: u64) -> usize {
    let mut at = usize::try_from(end).unwrap_or(usize::MAX).min(text.len());
    while at > 0 && !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}
