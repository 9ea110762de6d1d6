//! Post text formatting.
//!
//! A caption is built from up to four sections separated by blank lines:
//! author line, source link, hashtags and description. The result is
//! truncated so that text plus content warning fit the instance limit.

use rand::Rng;

use crate::config::Config;
use crate::searcher::SearchEntry;

const ELLIPSIS: &str = "...";

/// Settings used to build captions.
#[derive(Debug, Clone)]
pub struct CaptionConfig {
    /// Base URL of the search site, used for the fallback source link.
    pub site_url: String,
    pub info_prefix: String,
    pub info_suffix: String,
    pub max_tags: usize,
    pub char_limit: usize,
    pub spoiler_text: String,
}

impl From<&Config> for CaptionConfig {
    fn from(config: &Config) -> Self {
        Self {
            site_url: config.source.base_url(),
            info_prefix: config.target.info_prefix.clone(),
            info_suffix: config.target.info_suffix.clone(),
            max_tags: config.target.max_tags,
            char_limit: config.target.char_limit,
            spoiler_text: config.target.spoiler_text.clone(),
        }
    }
}

/// Build the post text for `entry`.
///
/// Returns `None` when the entry lacks an id or a file URL, in which case
/// nothing should be posted.
pub fn format_caption<R: Rng + ?Sized>(
    entry: &SearchEntry,
    config: &CaptionConfig,
    rng: &mut R,
) -> Option<String> {
    if entry.id.is_empty() || entry.file_url.is_empty() {
        return None;
    }

    let mut sections: Vec<String> = Vec::with_capacity(4);

    if let Some(author) = &entry.author {
        sections.push(format!(
            "{}{}{}",
            config.info_prefix, author, config.info_suffix
        ));
    }

    sections.push(match &entry.source {
        Some(source) => source.clone(),
        None => format!("{}/{}", config.site_url, entry.id),
    });

    if let Some(tags) = &entry.tags {
        let line = format_tags(tags, config.max_tags, rng);
        if !line.is_empty() {
            sections.push(line);
        }
    }

    if let Some(info) = &entry.info {
        sections.push(info.clone());
    }

    Some(truncate(
        sections.join("\n\n"),
        config.char_limit,
        &config.spoiler_text,
    ))
}

/// Shuffle a CSV tag list, keep up to `max_tags` and render them as hashtags.
pub fn format_tags<R: Rng + ?Sized>(csv: &str, max_tags: usize, rng: &mut R) -> String {
    let tags: Vec<&str> = csv.split(',').collect();

    shuffled(&tags, rng)
        .into_iter()
        .take(max_tags)
        .map(clean_tag)
        // A bare "#" is not a hashtag; skip tags that clean to nothing.
        .filter(|tag| !tag.is_empty())
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fisher-Yates shuffle returning a new vector.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly
/// chosen index in `0..=i`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Normalize one raw tag.
///
/// Source tags come as `" name"` or `" namespace:name"`: the first character
/// is dropped, spaces become underscores and a namespace prefix is removed.
pub fn clean_tag(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next();
    let tag = chars.as_str().replace(' ', "_");

    match tag.split(':').nth(1) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => tag,
    }
}

/// Cut `text` so that it plus `spoiler` fit in `char_limit` characters,
/// marking the cut with an ellipsis.
pub fn truncate(text: String, char_limit: usize, spoiler: &str) -> String {
    let text_len = text.chars().count();
    let spoiler_len = spoiler.chars().count();
    if text_len + spoiler_len <= char_limit {
        return text;
    }

    let keep = char_limit.saturating_sub(spoiler_len + ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
