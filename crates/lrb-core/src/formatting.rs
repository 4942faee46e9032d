//! Outbound text shaping (transport-limit chunking).

/// Split an over-length reply into ordered chunks of at most `max_chars`
/// characters each.
///
/// Concatenating the chunks reconstructs the input exactly; no separators are
/// added. The limit counts characters, not bytes, matching the transport's
/// message-length contract.
pub fn split_message(s: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);

    let mut out = Vec::new();
    let mut cur = String::new();
    let mut count = 0usize;

    for ch in s.chars() {
        if count == max_chars {
            out.push(std::mem::take(&mut cur));
            count = 0;
        }
        cur.push(ch);
        count += 1;
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_chunk() {
        assert_eq!(split_message("hello", 4096), vec!["hello".to_string()]);
    }

    #[test]
    fn empty_text_produces_no_chunks() {
        assert!(split_message("", 4096).is_empty());
    }

    #[test]
    fn exact_limit_is_one_chunk() {
        let s = "a".repeat(4096);
        let chunks = split_message(&s, 4096);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chars().count(), 4096);
    }

    #[test]
    fn one_over_limit_is_two_chunks() {
        let s = "a".repeat(4097);
        let chunks = split_message(&s, 4096);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 4096);
        assert_eq!(chunks[1].chars().count(), 1);
    }

    #[test]
    fn concatenation_reconstructs_the_input() {
        let s: String = ('a'..='z').cycle().take(10_000).collect();
        let chunks = split_message(&s, 4096);
        assert!(chunks.iter().all(|c| c.chars().count() <= 4096));
        assert_eq!(chunks.concat(), s);
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        let s = "é".repeat(10); // 2 bytes per char
        let chunks = split_message(&s, 4);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "é".repeat(4));
        assert_eq!(chunks.concat(), s);
    }
}
