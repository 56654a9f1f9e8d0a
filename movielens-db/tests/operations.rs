use movielens_catalog::types::*;
use movielens_db::*;

fn toy_story() -> Movie {
    Movie {
        movie_id: 1,
        title: "Toy Story (1995)".to_string(),
        genres: "Adventure|Animation|Children|Comedy|Fantasy".to_string(),
    }
}

#[test]
fn insert_movie_reports_duplicates() {
    let conn = open_memory().unwrap();
    assert!(is_empty(&conn).unwrap());
    assert!(insert_movie(&conn, &toy_story()).unwrap());
    assert!(!insert_movie(&conn, &toy_story()).unwrap());
    assert!(!is_empty(&conn).unwrap());
    assert_eq!(count_movies(&conn).unwrap(), 1);
}

#[test]
fn rating_requires_existing_movie() {
    let conn = open_memory().unwrap();
    let rating = Rating {
        user_id: 1,
        movie_id: 42,
        rating: 4.0,
        timestamp: 964982703,
    };
    let err = insert_rating(&conn, &rating).unwrap_err();
    assert!(matches!(err, OperationError::Sqlite(_)));
    assert_eq!(count_ratings(&conn).unwrap(), 0);
}

#[test]
fn rating_outside_scale_is_rejected() {
    let conn = open_memory().unwrap();
    insert_movie(&conn, &toy_story()).unwrap();
    let rating = Rating {
        user_id: 1,
        movie_id: 1,
        rating: 7.5,
        timestamp: 0,
    };
    let err = insert_rating(&conn, &rating).unwrap_err();
    assert!(matches!(
        err,
        OperationError::InvalidRating {
            user_id: 1,
            movie_id: 1,
            ..
        }
    ));
}

#[test]
fn one_rating_per_user_and_movie() {
    let conn = open_memory().unwrap();
    insert_movie(&conn, &toy_story()).unwrap();
    let rating = Rating {
        user_id: 1,
        movie_id: 1,
        rating: 4.0,
        timestamp: 0,
    };
    assert!(insert_rating(&conn, &rating).unwrap());
    let again = Rating {
        rating: 2.0,
        ..rating
    };
    assert!(!insert_rating(&conn, &again).unwrap());
    assert_eq!(get_rating(&conn, 1, 1).unwrap().unwrap().rating, 4.0);
}

#[test]
fn tag_text_is_part_of_identity() {
    let conn = open_memory().unwrap();
    insert_movie(&conn, &toy_story()).unwrap();
    let tag = |text: &str| Tag {
        user_id: 1,
        movie_id: 1,
        tag: text.to_string(),
        timestamp: 0,
    };
    assert!(insert_tag(&conn, &tag("pixar")).unwrap());
    assert!(insert_tag(&conn, &tag("Pixar")).unwrap());
    assert!(!insert_tag(&conn, &tag("pixar")).unwrap());
    assert_eq!(count_tags(&conn).unwrap(), 2);
}

#[test]
fn link_ids_may_be_null() {
    let conn = open_memory().unwrap();
    insert_movie(&conn, &toy_story()).unwrap();
    let link = Link {
        movie_id: 1,
        imdb_id: Some(114709),
        tmdb_id: None,
    };
    assert!(insert_link(&conn, &link).unwrap());
    assert_eq!(get_link(&conn, 1).unwrap(), Some(link));
}

#[test]
fn deleting_a_movie_cascades() {
    let conn = open_memory().unwrap();
    insert_movie(&conn, &toy_story()).unwrap();
    insert_rating(
        &conn,
        &Rating {
            user_id: 1,
            movie_id: 1,
            rating: 4.0,
            timestamp: 0,
        },
    )
    .unwrap();
    insert_tag(
        &conn,
        &Tag {
            user_id: 1,
            movie_id: 1,
            tag: "pixar".to_string(),
            timestamp: 0,
        },
    )
    .unwrap();
    insert_link(
        &conn,
        &Link {
            movie_id: 1,
            imdb_id: None,
            tmdb_id: None,
        },
    )
    .unwrap();

    conn.execute("DELETE FROM movies WHERE movie_id = 1", [])
        .unwrap();

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats, CatalogStats::default());
}
