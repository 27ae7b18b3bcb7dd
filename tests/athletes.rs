mod common;

use common::{events_csv, filter, no_filter, sample_dataset};
use olympic_stats::{
    athletes::{AthleteMedals, top_athletes},
    filter::SeasonFilter,
    loader::{LoadOptions, load_dataset},
};

fn athlete(name: &str, noc: &str, medals: u64) -> AthleteMedals {
    AthleteMedals {
        name: name.to_string(),
        noc: noc.to_string(),
        medals,
    }
}

#[test]
fn team_members_each_receive_the_medal() {
    let dataset = sample_dataset();
    let view = top_athletes(&dataset, &no_filter(), 15);
    assert_eq!(
        view.rows(),
        &[
            athlete("Alice Archer", "USA", 2),
            athlete("Fiona Finch", "GBR", 2),
            athlete("Beth Brooks", "USA", 1),
            athlete("Cara Cole", "USA", 1),
            athlete("Dmitri Dorn", "RUS", 1),
            athlete("Emil Egger", "SUI", 1),
            athlete("Gus Grant", "USA", 1),
        ]
    );
}

#[test]
fn top_limit_truncates_the_ranking() {
    let dataset = sample_dataset();
    let view = top_athletes(&dataset, &no_filter(), 1);
    assert_eq!(view.rows(), &[athlete("Alice Archer", "USA", 2)]);
}

#[test]
fn namesakes_with_different_ids_stay_apart() {
    let events = events_csv(&[
        "10,John Smith,M,24,180,80,USA,USA,2000 Summer,2000,Summer,Sydney,Rowing,Rowing Men's Pair,Gold",
        "11,John Smith,M,30,175,70,USA,USA,2000 Summer,2000,Summer,Sydney,Shooting,Shooting Men's Trap,Bronze",
        "11,John Smith,M,30,175,70,USA,USA,2000 Summer,2000,Summer,Sydney,Shooting,Shooting Men's Trap,Bronze",
    ]);
    let dataset = load_dataset(
        events.as_bytes(),
        b"NOC,region\nUSA,USA\n",
        &LoadOptions::default(),
    )
    .expect("load");
    let view = top_athletes(&dataset, &no_filter(), 0);
    assert_eq!(
        view.rows(),
        &[
            athlete("John Smith", "USA", 1),
            athlete("John Smith", "USA", 1),
        ]
    );
}

#[test]
fn filters_restrict_the_athlete_ranking() {
    let dataset = sample_dataset();
    let selection = filter(SeasonFilter::Summer, Some((2000, 2000)), &["GBR"]);
    let view = top_athletes(&dataset, &selection, 15);
    assert_eq!(view.rows(), &[athlete("Fiona Finch", "GBR", 2)]);

    let nobody = filter(SeasonFilter::Both, Some((2016, 2016)), &[]);
    assert!(top_athletes(&dataset, &nobody, 15).is_no_data());
}

#[test]
fn tied_athletes_order_by_numeric_id() {
    let events = events_csv(&[
        "10,Zoe Zander,F,24,170,60,USA,USA,2000 Summer,2000,Summer,Sydney,Judo,Judo Women's Lightweight,Gold",
        "9,Yuri Yates,M,26,180,80,GBR,GBR,2000 Summer,2000,Summer,Sydney,Judo,Judo Men's Lightweight,Gold",
        "100,Xavier Xu,M,22,175,70,USA,USA,2000 Summer,2000,Summer,Sydney,Judo,Judo Men's Heavyweight,Gold",
    ]);
    let dataset = load_dataset(
        events.as_bytes(),
        b"NOC,region\nUSA,USA\nGBR,UK\n",
        &LoadOptions::default(),
    )
    .expect("load");
    let view = top_athletes(&dataset, &no_filter(), 0);
    assert_eq!(
        view.rows(),
        &[
            athlete("Yuri Yates", "GBR", 1),
            athlete("Zoe Zander", "USA", 1),
            athlete("Xavier Xu", "USA", 1),
        ]
    );
    assert_eq!(
        top_athletes(&dataset, &no_filter(), 1).rows(),
        &[athlete("Yuri Yates", "GBR", 1)]
    );
}
