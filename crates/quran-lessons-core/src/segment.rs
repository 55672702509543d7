//! Daily-lesson segmenter.
//!
//! Groups each surah's ayahs into lessons of one to `max_ayahs_per_group`
//! ayahs and derives the lesson text from their commentary.
//!
//! # Algorithm
//!
//! For each surah id `1..=114`, in order:
//!
//! 1. Stable-sort the surah's ayahs by ayah number.
//! 2. Add ayahs one at a time to the current group, summing the word count
//!    of each ayah's commentary.
//! 3. After each addition, close the group when the word sum reaches
//!    `group_word_target` or the group holds `max_ayahs_per_group` ayahs.
//! 4. At the end of the surah, close any remaining partial group, however
//!    short.
//!
//! Groups never cross a surah boundary. Day indices come from a single
//! counter threaded through the whole batch, so they run `0..N` across all
//! surahs in emission order.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::commentary::CommentarySource;
use crate::models::{
    lesson_id, AyahRecord, DailyLesson, LessonSource, SurahNames, VerseKey, SURAH_COUNT,
};
use crate::tags::tags_for_text;
use crate::text::{
    make_body_short, make_takeaways, make_title, split_sentences, trim_space, word_count,
    SummaryLimits,
};

/// Segmentation and text-derivation limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Close a group once its commentary reaches this many words.
    pub group_word_target: usize,
    /// Close a group once it holds this many ayahs.
    pub max_ayahs_per_group: usize,
    pub title_max_words: usize,
    pub summary_max_sentences: usize,
    pub summary_min_sentences: usize,
    pub summary_word_target: usize,
    /// Upper bound on `bodyShort` words.
    pub summary_word_limit: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            group_word_target: 150,
            max_ayahs_per_group: 3,
            title_max_words: 10,
            summary_max_sentences: 4,
            summary_min_sentences: 2,
            summary_word_target: 150,
            summary_word_limit: 300,
        }
    }
}

impl SegmenterConfig {
    pub fn summary_limits(&self) -> SummaryLimits {
        SummaryLimits {
            max_sentences: self.summary_max_sentences,
            min_sentences: self.summary_min_sentences,
            word_target: self.summary_word_target,
            word_limit: self.summary_word_limit,
        }
    }
}

/// Per-surah result handed to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurahSummary {
    pub surah_id: u32,
    pub ayahs: usize,
    pub lessons: usize,
    /// Lessons emitted so far across the whole batch.
    pub total_lessons: usize,
}

/// Ayahs accumulated for the lesson currently being built.
struct LessonGroup<'a> {
    surah_id: u32,
    keys: Vec<VerseKey>,
    texts: Vec<&'a str>,
    words: usize,
}

impl<'a> LessonGroup<'a> {
    fn new(surah_id: u32) -> Self {
        Self {
            surah_id,
            keys: Vec::new(),
            texts: Vec::new(),
            words: 0,
        }
    }

    fn push(&mut self, key: VerseKey, text: &'a str) {
        self.keys.push(key);
        self.texts.push(text);
        self.words += word_count(text);
    }

    fn is_full(&self, config: &SegmenterConfig) -> bool {
        self.words >= config.group_word_target || self.keys.len() >= config.max_ayahs_per_group
    }

    fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn body_full(&self) -> String {
        let joined = self
            .texts
            .iter()
            .filter(|t| !t.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        trim_space(&joined).to_string()
    }
}

/// Build lessons for every surah `1..=114`.
pub fn build_lessons<C: CommentarySource>(
    commentary: &C,
    ayahs: &[AyahRecord],
    surahs: &SurahNames,
    source: &LessonSource,
    config: &SegmenterConfig,
) -> Vec<DailyLesson> {
    build_lessons_with(commentary, ayahs, surahs, source, config, |_| {})
}

/// [`build_lessons`] with a callback invoked after each surah.
pub fn build_lessons_with<C, F>(
    commentary: &C,
    ayahs: &[AyahRecord],
    surahs: &SurahNames,
    source: &LessonSource,
    config: &SegmenterConfig,
    mut on_surah: F,
) -> Vec<DailyLesson>
where
    C: CommentarySource,
    F: FnMut(&SurahSummary),
{
    let mut by_surah: BTreeMap<u32, Vec<AyahRecord>> = BTreeMap::new();
    for ayah in ayahs {
        by_surah.entry(ayah.surah_id).or_default().push(*ayah);
    }

    let mut lessons = Vec::new();
    let mut day_index = 0;

    for surah_id in 1..=SURAH_COUNT {
        let surah_ayahs = by_surah.remove(&surah_id).unwrap_or_default();
        let surah_name = surahs.display_name(surah_id);
        let (surah_lessons, next_day) = segment_surah(
            surah_id,
            surah_ayahs,
            commentary,
            &surah_name,
            source,
            config,
            day_index,
        );
        day_index = next_day;

        on_surah(&SurahSummary {
            surah_id,
            ayahs: surah_lessons.iter().map(|l| l.verse_keys.len()).sum(),
            lessons: surah_lessons.len(),
            total_lessons: day_index,
        });
        lessons.extend(surah_lessons);
    }

    lessons
}

/// Segment one surah's ayahs, numbering lessons from `day_index`.
///
/// Returns the lessons and the next free day index. Ayahs belonging to
/// another surah are ignored.
pub fn segment_surah<C: CommentarySource>(
    surah_id: u32,
    mut ayahs: Vec<AyahRecord>,
    commentary: &C,
    surah_name: &str,
    source: &LessonSource,
    config: &SegmenterConfig,
    mut day_index: usize,
) -> (Vec<DailyLesson>, usize) {
    ayahs.retain(|a| a.surah_id == surah_id);
    ayahs.sort_by_key(|a| a.ayah_number);

    let mut lessons = Vec::new();
    let mut group = LessonGroup::new(surah_id);

    for ayah in &ayahs {
        let key = ayah.verse_key();
        group.push(key, commentary.text_for(&key));

        if group.is_full(config) {
            lessons.push(build_lesson(&group, surah_name, day_index, source, config));
            day_index += 1;
            group = LessonGroup::new(surah_id);
        }
    }

    if !group.is_empty() {
        lessons.push(build_lesson(&group, surah_name, day_index, source, config));
        day_index += 1;
    }

    (lessons, day_index)
}

/// Number of ayahs whose surah id lies outside `1..=114`; these never
/// reach a lesson.
pub fn out_of_range_ayahs(ayahs: &[AyahRecord]) -> usize {
    ayahs
        .iter()
        .filter(|a| a.surah_id == 0 || a.surah_id > SURAH_COUNT)
        .count()
}

fn build_lesson(
    group: &LessonGroup<'_>,
    surah_name: &str,
    day_index: usize,
    source: &LessonSource,
    config: &SegmenterConfig,
) -> DailyLesson {
    let ayah_start = group.keys.first().map(|k| k.ayah_number).unwrap_or_default();
    let ayah_end = group.keys.last().map(|k| k.ayah_number).unwrap_or_default();

    let body_full = group.body_full();
    let sentences = split_sentences(&body_full);
    let fallback = format!("{} (Ayah {}-{})", surah_name, ayah_start, ayah_end);
    let title = make_title(&sentences, config.title_max_words, &fallback);
    let body_short = make_body_short(&sentences, config.summary_limits());
    let takeaways = make_takeaways(&sentences);
    let tags = tags_for_text(&body_full);

    DailyLesson {
        id: lesson_id(day_index),
        day_index,
        surah_id: group.surah_id,
        ayah_start,
        ayah_end,
        verse_keys: group.keys.iter().map(VerseKey::to_string).collect(),
        title,
        body_short,
        body_full,
        takeaways,
        tags,
        source: source.clone(),
    }
}
