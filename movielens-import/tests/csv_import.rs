use std::fs;
use std::path::Path;

use movielens_db::*;
use movielens_import::*;

const MOVIES: &str = "\
movieId,title,genres
1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
2,Jumanji (1995),Adventure|Children|Fantasy
3,Grumpier Old Men (1995),Comedy|Romance
11,\"American President, The (1995)\",Comedy|Drama|Romance
";

const LINKS: &str = "\
movieId,imdbId,tmdbId
1,0114709,862
2,0113497,8844
3,0113228,
99,0000001,1
";

const RATINGS: &str = "\
userId,movieId,rating,timestamp
1,1,4.0,964982703
1,3,4.0,964981247
5,1,4.0,847434962
7,2,not-a-number,1106635946
8,99,3.0,1106635946
9,2,9.5,1106635946
1,1,2.0,964982999
";

const TAGS: &str = "\
userId,movieId,tag,timestamp
2,1,pixar,1445714994
2,1,Pixar,1445714996
2,1,pixar,1445714999
18,11,\"politics, romance\",1455209816
";

fn write_dataset(dir: &Path, files: &[(&str, &str)]) {
    for (name, contents) in files {
        fs::write(dir.join(name), contents).unwrap();
    }
}

fn full_dataset(dir: &Path) {
    write_dataset(
        dir,
        &[
            (MOVIES_FILE, MOVIES),
            (LINKS_FILE, LINKS),
            (RATINGS_FILE, RATINGS),
            (TAGS_FILE, TAGS),
        ],
    );
}

#[test]
fn load_full_dataset() {
    let dir = tempfile::tempdir().unwrap();
    full_dataset(dir.path());
    let conn = open_memory().unwrap();

    let stats = load_dataset(&conn, dir.path(), &SilentProgress).unwrap();

    assert_eq!(stats.movies.inserted, 4);
    assert_eq!(stats.links.inserted, 3);
    assert_eq!(stats.links.orphans, 1);
    assert_eq!(stats.ratings.inserted, 3);
    assert_eq!(stats.ratings.orphans, 1);
    assert_eq!(stats.ratings.malformed, 2);
    assert_eq!(stats.ratings.duplicates, 1);
    assert_eq!(stats.tags.inserted, 3);
    assert_eq!(stats.tags.duplicates, 1);

    let counts = catalog_stats(&conn).unwrap();
    assert_eq!(counts.movie_count, 4);
    assert_eq!(counts.link_count, 3);
    assert_eq!(counts.rating_count, 3);
    assert_eq!(counts.tag_count, 3);
}

#[test]
fn quoted_fields_keep_commas() {
    let dir = tempfile::tempdir().unwrap();
    full_dataset(dir.path());
    let conn = open_memory().unwrap();
    load_dataset(&conn, dir.path(), &SilentProgress).unwrap();

    let movie = get_movie(&conn, 11).unwrap().unwrap();
    assert_eq!(movie.title, "American President, The (1995)");
    assert!(get_tag(&conn, 18, 11, "politics, romance").unwrap().is_some());
}

#[test]
fn external_ids_parse_and_blank_is_null() {
    let dir = tempfile::tempdir().unwrap();
    full_dataset(dir.path());
    let conn = open_memory().unwrap();
    load_dataset(&conn, dir.path(), &SilentProgress).unwrap();

    let toy = get_link(&conn, 1).unwrap().unwrap();
    assert_eq!(toy.imdb_id, Some(114709));
    assert_eq!(toy.tmdb_id, Some(862));

    let grumpier = get_link(&conn, 3).unwrap().unwrap();
    assert_eq!(grumpier.tmdb_id, None);

    assert!(get_link(&conn, 99).unwrap().is_none());
}

#[test]
fn first_duplicate_rating_wins() {
    let dir = tempfile::tempdir().unwrap();
    full_dataset(dir.path());
    let conn = open_memory().unwrap();
    load_dataset(&conn, dir.path(), &SilentProgress).unwrap();

    let rating = get_rating(&conn, 1, 1).unwrap().unwrap();
    assert_eq!(rating.rating, 4.0);
    assert_eq!(rating.timestamp, 964982703);
}

#[test]
fn only_movies_file_is_required() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), &[(MOVIES_FILE, MOVIES)]);
    let conn = open_memory().unwrap();

    let stats = load_dataset(&conn, dir.path(), &SilentProgress).unwrap();
    assert_eq!(stats.movies.inserted, 4);
    assert_eq!(stats.ratings, TableStats::default());
    assert_eq!(count_ratings(&conn).unwrap(), 0);
}

#[test]
fn missing_movies_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), &[(RATINGS_FILE, RATINGS)]);
    let conn = open_memory().unwrap();

    let err = load_dataset(&conn, dir.path(), &SilentProgress).unwrap_err();
    assert!(matches!(err, ImportError::MissingFile(_)));
    assert_eq!(count_ratings(&conn).unwrap(), 0);
}

#[test]
fn refuses_to_load_twice() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), &[(MOVIES_FILE, MOVIES)]);
    let conn = open_memory().unwrap();

    load_dataset(&conn, dir.path(), &SilentProgress).unwrap();
    let err = load_dataset(&conn, dir.path(), &SilentProgress).unwrap_err();
    assert!(matches!(err, ImportError::NotEmpty));
    assert_eq!(count_movies(&conn).unwrap(), 4);
}

#[test]
fn loads_into_file_database() {
    let dir = tempfile::tempdir().unwrap();
    full_dataset(dir.path());
    let db_path = dir.path().join("movies.db");

    {
        let conn = open_database(&db_path).unwrap();
        load_dataset(&conn, dir.path(), &LogProgress).unwrap();
    }

    let conn = open_read_only(&db_path).unwrap();
    assert_eq!(count_movies(&conn).unwrap(), 4);
    let page = Page::first(10).unwrap();
    let comedies = list_movies(
        &conn,
        page,
        &MovieFilter {
            genre: Some("comedy".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    let ids: Vec<i64> = comedies.iter().map(|m| m.movie_id).collect();
    assert_eq!(ids, vec![1, 3, 11]);
}

#[test]
fn field_whitespace_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(
        dir.path(),
        &[
            (MOVIES_FILE, "movieId,title,genres\n1,Toy Story (1995) ,Animation\n"),
            (
                TAGS_FILE,
                "userId,movieId,tag,timestamp\n\
                 1,1,funny,1445714994\n\
                 1,1,funny ,1445714995\n\
                 1,1, pixar,1445714996\n",
            ),
        ],
    );
    let conn = open_memory().unwrap();

    let stats = load_dataset(&conn, dir.path(), &SilentProgress).unwrap();

    assert_eq!(stats.tags.inserted, 3);
    assert_eq!(stats.tags.duplicates, 0);
    assert!(get_tag(&conn, 1, 1, "funny").unwrap().is_some());
    assert!(get_tag(&conn, 1, 1, "funny ").unwrap().is_some());
    assert!(get_tag(&conn, 1, 1, " pixar").unwrap().is_some());
    assert!(get_tag(&conn, 1, 1, "pixar").unwrap().is_none());
    assert_eq!(get_movie(&conn, 1).unwrap().unwrap().title, "Toy Story (1995) ");
}
