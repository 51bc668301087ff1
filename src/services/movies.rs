use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Movie;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MovieStatus {
    #[serde(rename = "Now Showing")]
    NowShowing,
    #[serde(rename = "Coming Soon")]
    ComingSoon,
}

/// Карточка фильма для сетки дашборда.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCard {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub duration: String,
    pub status: MovieStatus,
    pub release: Option<i32>,
    pub trailer_youtube_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieStats {
    pub total: usize,
    pub now_showing: usize,
    pub coming_soon: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieFilter {
    #[default]
    All,
    Showing,
    Coming,
}

impl From<Movie> for MovieCard {
    fn from(movie: Movie) -> Self {
        let status = if movie.status == Some(1) {
            MovieStatus::NowShowing
        } else {
            MovieStatus::ComingSoon
        };
        Self {
            id: movie.id,
            title: movie.name,
            image: movie.poster,
            duration: format!("{} min", movie.length.unwrap_or(0)),
            status,
            release: movie.release_date.as_deref().and_then(release_year),
            trailer_youtube_id: movie.trailer_youtube_id,
        }
    }
}

/// Год выхода из `2024-05-01` или `2024-05-01T00:00:00`.
fn release_year(raw: &str) -> Option<i32> {
    let date = raw.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

impl MovieFilter {
    pub fn matches(self, card: &MovieCard) -> bool {
        match self {
            MovieFilter::All => true,
            MovieFilter::Showing => card.status == MovieStatus::NowShowing,
            MovieFilter::Coming => card.status == MovieStatus::ComingSoon,
        }
    }
}

pub fn stats(cards: &[MovieCard]) -> MovieStats {
    let now_showing = cards
        .iter()
        .filter(|card| card.status == MovieStatus::NowShowing)
        .count();
    MovieStats {
        total: cards.len(),
        now_showing,
        coming_soon: cards.len() - now_showing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, status: Option<i32>, release: Option<&str>) -> Movie {
        Movie {
            id,
            name: format!("Movie {}", id),
            poster: None,
            length: Some(120),
            status,
            release_date: release.map(str::to_string),
            trailer_youtube_id: None,
        }
    }

    #[test]
    fn card_labels_follow_dashboard_wording() {
        let card = MovieCard::from(movie(1, Some(1), Some("2024-11-22T00:00:00")));
        assert_eq!(card.status, MovieStatus::NowShowing);
        assert_eq!(card.duration, "120 min");
        assert_eq!(card.release, Some(2024));
        assert_eq!(
            serde_json::to_value(&card).unwrap()["status"],
            "Now Showing"
        );

        let upcoming = MovieCard::from(movie(2, Some(0), Some("soon")));
        assert_eq!(upcoming.status, MovieStatus::ComingSoon);
        assert_eq!(upcoming.release, None);
    }

    #[test]
    fn stats_and_filters_split_by_status() {
        let cards: Vec<MovieCard> = vec![
            movie(1, Some(1), None),
            movie(2, Some(2), None),
            movie(3, None, None),
        ]
        .into_iter()
        .map(MovieCard::from)
        .collect();

        assert_eq!(
            stats(&cards),
            MovieStats {
                total: 3,
                now_showing: 1,
                coming_soon: 2
            }
        );
        let coming: Vec<_> = cards
            .iter()
            .filter(|c| MovieFilter::Coming.matches(c))
            .map(|c| c.id)
            .collect();
        assert_eq!(coming, vec![2, 3]);
        assert!(cards.iter().all(|c| MovieFilter::All.matches(c)));
    }
}
