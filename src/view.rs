//! Turns application state into a plain description of what to show.
//!
//! Nothing here does I/O; the binary prints a [`View`] through its `Display` impl.

use std::fmt;
use chrono::{DateTime, Local};
use itertools::Itertools;
use log::*;
use url::Url;

use crate::filter::Predicate;
use crate::model::{FavoriteEntry, Record, Schema};
use crate::timer::Countdown;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub badges: Vec<String>,
    pub lines: Vec<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteLine {
    pub index: usize,
    pub meta: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub selected: Option<Card>,
    pub favorites: Vec<FavoriteLine>,
    pub timer: String,
}

pub fn render(
    schema: &Schema,
    selected: Option<&Record>,
    favorites: &[FavoriteEntry],
    timer: &Countdown,
) -> View {
    View {
        selected: selected.map(|r| card(schema, r)),
        favorites: favorites.iter().enumerate()
            .map(|(index, f)| favorite_line(schema, index, f))
            .collect(),
        timer: timer.display(),
    }
}

pub fn card(schema: &Schema, record: &Record) -> Card {
    if *schema == Schema::PLACES {
        place_card(schema, record)
    } else {
        content_card(record)
    }
}

fn content_card(record: &Record) -> Card {
    let mut lines = vec![];
    push_nonempty(&mut lines, "", record.get("quote"));
    push_nonempty(&mut lines, "- ", record.get("reference"));
    push_nonempty(&mut lines, "Tip: ", record.get("tip"));

    let mut links = vec![];
    let video = record.get("video_link");
    if !video.is_empty() {
        let label = match record.get("video_title") {
            "" => "Video",
            title => title,
        };
        links.push(Link { label: label.to_owned(), url: embed_url(video) });
    }
    let music = record.get("music_link").trim();
    if !music.is_empty() {
        links.push(Link { label: "Open music / sound".to_owned(), url: music.to_owned() });
    }

    Card {
        title: record.get("issue").to_owned(),
        badges: vec![],
        lines,
        links,
    }
}

fn place_card(schema: &Schema, record: &Record) -> Card {
    let mut badges = vec![];
    push_nonempty(&mut badges, "", record.category(schema));
    let spooky = schema.flag.map(|f| Predicate::Flagged(f.to_owned()));
    if spooky.map_or(false, |p| p.matches(record)) {
        badges.push("Spooky".to_owned());
    }

    let mut lines = vec![];
    push_nonempty(&mut lines, "", record.get("description"));
    push_nonempty(&mut lines, "Location: ", record.get("location"));
    let best_time = match record.get("best_time_to_visit") {
        "" => record.get("best_time"),
        t => t,
    };
    push_nonempty(&mut lines, "Best time: ", best_time);
    let distance = record.get("distance_from_pune_km");
    if !distance.is_empty() {
        lines.push(format!("{} km from Pune", distance));
    }
    push_nonempty(&mut lines, "Interesting facts: ", record.get("facts"));
    push_nonempty(&mut lines, "Rules & tips: ", record.get("rules"));

    let links = Some(record.get("map_link"))
        .filter(|l| !l.is_empty())
        .map(|l| Link { label: "View on Map".to_owned(), url: l.to_owned() })
        .into_iter()
        .collect();

    Card {
        title: record.get("name").to_owned(),
        badges,
        lines,
        links,
    }
}

fn push_nonempty(lines: &mut Vec<String>, prefix: &str, value: &str) {
    if !value.is_empty() {
        lines.push(format!("{}{}", prefix, value));
    }
}

fn favorite_line(schema: &Schema, index: usize, favorite: &FavoriteEntry) -> FavoriteLine {
    let record = &favorite.record;
    let when = DateTime::parse_from_rfc3339(&favorite.saved_at)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| favorite.saved_at.clone());
    let summary = if *schema == Schema::PLACES {
        record.get("name")
    } else {
        record.get("quote")
    };
    FavoriteLine {
        index,
        meta: format!("{} • {}", record.category(schema), when),
        summary: summary.to_owned(),
    }
}

/// Rewrites YouTube watch, short and share links into their embeddable form.
/// Anything else, including text that does not parse as a URL, is returned unchanged.
pub fn embed_url(link: &str) -> String {
    const EMBED: &str = "https://www.youtube.com/embed/";

    let parsed = match Url::parse(link) {
        Ok(u) => u,
        Err(e) => {
            debug!("Not embedding {:?}: {}", link, e);
            return link.to_owned();
        }
    };
    let host = parsed.host_str().unwrap_or("");

    if host.contains("youtube.com") {
        let id = parsed.query_pairs()
            .find(|(k, v)| *k == "v" && !v.is_empty())
            .map(|(_, v)| v.into_owned());
        if let Some(id) = id {
            return format!("{}{}", EMBED, id);
        }
        if parsed.path().starts_with("/embed/") {
            return link.to_owned();
        }
        if parsed.path().starts_with("/shorts/") {
            if let Some(id) = parsed.path_segments().and_then(|s| s.last()) {
                return format!("{}{}", EMBED, id);
            }
        }
    }
    if host == "youtu.be" {
        return format!("{}{}", EMBED, parsed.path().trim_start_matches('/'));
    }
    link.to_owned()
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.badges.is_empty() {
            writeln!(f, "{}", self.title)?;
        } else {
            writeln!(f, "{} [{}]", self.title, self.badges.iter().join("] ["))?;
        }
        for line in &self.lines {
            writeln!(f, "  {}", line)?;
        }
        for link in &self.links {
            writeln!(f, "  {}: {}", link.label, link.url)?;
        }
        Ok(())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selected {
            Some(card) => write!(f, "{}", card)?,
            None => writeln!(f, "Nothing found for the current filters.")?,
        }
        writeln!(f)?;
        if self.favorites.is_empty() {
            writeln!(f, "No favorites yet.")?;
        } else {
            writeln!(f, "Favorites:")?;
            for fav in &self.favorites {
                writeln!(f, "  [{}] {}  {}", fav.index, fav.meta, fav.summary)?;
            }
        }
        writeln!(f, "Timer {}", self.timer)
    }
}

/// Renders favorites alone, for listing
pub fn favorites_text(schema: &Schema, favorites: &[FavoriteEntry]) -> String {
    if favorites.is_empty() {
        return "No favorites yet.".to_owned();
    }
    favorites.iter().enumerate()
        .map(|(i, f)| favorite_line(schema, i, f))
        .map(|l| format!("[{}] {}  {}", l.index, l.meta, l.summary))
        .join("\n")
}
