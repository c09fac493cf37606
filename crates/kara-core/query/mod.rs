//! Time-query helpers and id lookups
//!
//! Read-only accessors shared by the editor's commands and by UI code.

pub mod lookup;
pub mod time;

pub use lookup::{
    entity_kind, find_line, find_line_index, find_lines_by_id, find_subword, find_subwords_by_id,
    find_word, find_words_by_id, locate_subword, EntityKind, SubwordLocation, WordLocation,
};
pub use time::{
    default_word_duration, find_line_by_time, find_next_subword_by_time, get_new_word_time,
    get_new_word_time_by_subword, get_new_word_time_with, is_line_at_time,
};
