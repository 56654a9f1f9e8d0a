use movielens_catalog::*;

fn toy_story() -> Movie {
    Movie {
        movie_id: 1,
        title: "Toy Story (1995)".to_string(),
        genres: "Adventure|Animation|Children|Comedy|Fantasy".to_string(),
    }
}

#[test]
fn genre_list_splits_on_pipe() {
    let movie = toy_story();
    assert_eq!(
        movie.genre_list(),
        vec!["Adventure", "Animation", "Children", "Comedy", "Fantasy"]
    );
}

#[test]
fn genre_list_placeholder_is_empty() {
    let movie = Movie {
        movie_id: 2,
        title: "Untitled".to_string(),
        genres: "(no genres listed)".to_string(),
    };
    assert!(movie.genre_list().is_empty());
}

#[test]
fn year_from_title() {
    assert_eq!(toy_story().year(), Some(1995));

    let odd = Movie {
        movie_id: 3,
        title: "Babylon 5".to_string(),
        genres: String::new(),
    };
    assert_eq!(odd.year(), None);

    let not_year = Movie {
        movie_id: 4,
        title: "Something (Director's Cut)".to_string(),
        genres: String::new(),
    };
    assert_eq!(not_year.year(), None);
}

#[test]
fn movie_display_lists_genres() {
    let text = toy_story().to_string();
    assert!(text.starts_with("Movie #1: Toy Story (1995)"));
    assert!(text.contains("Adventure, Animation"));
}

#[test]
fn validate_score_bounds() {
    assert_eq!(validate_score(0.0), Ok(0.0));
    assert_eq!(validate_score(5.0), Ok(5.0));
    assert_eq!(validate_score(3.5), Ok(3.5));
    assert!(validate_score(-0.5).is_err());
    assert!(validate_score(5.5).is_err());
    assert!(validate_score(f64::NAN).is_err());
}

#[test]
fn rating_timestamp_converts() {
    let rating = Rating {
        user_id: 1,
        movie_id: 1,
        rating: 4.0,
        timestamp: 964982703,
    };
    let at = rating.rated_at().unwrap();
    assert_eq!(format_datetime(&at), "2000-07-30 18:45:03 UTC");
    assert!(rating.to_string().contains("4.0/5.0"));
}

#[test]
fn link_urls() {
    let link = Link {
        movie_id: 1,
        imdb_id: Some(114709),
        tmdb_id: Some(862),
    };
    assert_eq!(
        link.imdb_url().as_deref(),
        Some("https://www.imdb.com/title/tt0114709/")
    );
    assert_eq!(
        link.tmdb_url().as_deref(),
        Some("https://www.themoviedb.org/movie/862")
    );

    let bare = Link {
        movie_id: 2,
        imdb_id: None,
        tmdb_id: None,
    };
    assert_eq!(bare.imdb_url(), None);
    assert_eq!(bare.to_string(), "Link: movie 2 imdb=- tmdb=-");
}

#[test]
fn detail_average_and_flattened_json() {
    let detail = MovieDetail {
        movie: toy_story(),
        ratings: vec![
            Rating {
                user_id: 1,
                movie_id: 1,
                rating: 4.0,
                timestamp: 0,
            },
            Rating {
                user_id: 2,
                movie_id: 1,
                rating: 3.0,
                timestamp: 0,
            },
        ],
        tags: vec![],
        link: None,
    };
    assert_eq!(detail.average_rating(), Some(3.5));

    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["movie_id"], 1);
    assert_eq!(json["title"], "Toy Story (1995)");
    assert_eq!(json["ratings"].as_array().unwrap().len(), 2);
    assert!(json["link"].is_null());
}
