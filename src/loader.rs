//! Loading and normalizing the athlete-events and NOC-regions tables.
//!
//! The two inputs are parsed from bytes, left-joined on NOC and normalized
//! into a [`Dataset`]: numeric columns are coerced leniently, missing medals
//! become [`Medal::NoMedal`], and a de-duplicated team-medal table is derived
//! so that a team event contributes one medal per country.

use std::collections::{HashMap, HashSet};

use encoding_rs::{Encoding, UTF_8};
use log::{debug, info, warn};

use crate::{
    data::{
        AthleteEvent, Medal, Region, TeamMedal, non_null, optional_text, parse_lenient_f64,
        parse_lenient_year,
    },
    error::{LoadError, LoadResult, TableKind},
    io_utils,
    schema::{self, EventColumns, RegionColumns, field, optional_field},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub events_delimiter: u8,
    pub regions_delimiter: u8,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            events_delimiter: io_utils::DEFAULT_CSV_DELIMITER,
            regions_delimiter: io_utils::DEFAULT_CSV_DELIMITER,
            encoding: UTF_8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows read from the athlete-events input.
    pub event_rows: usize,
    pub region_rows: usize,
    /// Joined rows whose NOC had no region mapping.
    pub unmatched_rows: usize,
    /// Extra rows produced by duplicate NOC keys in the region table.
    pub fanout_rows: usize,
    /// Event rows with a blank name, sex, NOC, games, season, sport or event.
    pub incomplete_rows: usize,
    /// Event rows whose medal text was not gold, silver or bronze.
    pub unrecognized_medals: usize,
}

/// Normalized records plus the derived team-medal table. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<AthleteEvent>,
    pub team_medals: Vec<TeamMedal>,
    pub stats: LoadStats,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn load_dataset(events: &[u8], regions: &[u8], options: &LoadOptions) -> LoadResult<Dataset> {
    let lookup = read_regions(regions, options)?;
    let region_rows = lookup.values().map(Vec::len).sum();
    let raw_events = read_events(events, options)?;

    let mut stats = LoadStats {
        event_rows: raw_events.len(),
        region_rows,
        incomplete_rows: raw_events.iter().filter(|e| is_incomplete(e)).count(),
        unrecognized_medals: raw_events
            .iter()
            .filter(|e| e.medal == Medal::Other)
            .count(),
        ..LoadStats::default()
    };
    let records = left_join(raw_events, &lookup, &mut stats);
    let team_medals = derive_team_medals(&records);

    if stats.incomplete_rows > 0 {
        warn!(
            "{} athlete-event row(s) have blank text fields; they are kept but skipped by views keyed on those fields",
            stats.incomplete_rows
        );
    }
    if stats.unrecognized_medals > 0 {
        warn!(
            "{} athlete-event row(s) carry unrecognized medal text; counted as medals, left out of the breakdown",
            stats.unrecognized_medals
        );
    }
    if stats.fanout_rows > 0 {
        warn!(
            "Region table maps some NOC codes more than once; join produced {} extra row(s)",
            stats.fanout_rows
        );
    }
    info!(
        "Loaded {} athlete-event row(s), {} region mapping(s), {} team medal(s)",
        stats.event_rows,
        stats.region_rows,
        team_medals.len()
    );
    debug!("{} joined row(s) without a region", stats.unmatched_rows);

    Ok(Dataset {
        records,
        team_medals,
        stats,
    })
}

fn read_headers(
    reader: &mut csv::Reader<&[u8]>,
    table: TableKind,
    encoding: &'static Encoding,
) -> LoadResult<Vec<String>> {
    let raw = reader
        .byte_headers()
        .map_err(|source| LoadError::Csv { table, source })?
        .clone();
    let decoded = io_utils::decode_record(&raw, encoding).map_err(|err| LoadError::Decode {
        table,
        row: 1,
        message: err.to_string(),
    })?;
    let headers = schema::trim_headers(&decoded);
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::EmptyInput { table });
    }
    Ok(headers)
}

fn read_rows<F>(
    bytes: &[u8],
    delimiter: u8,
    table: TableKind,
    encoding: &'static Encoding,
    mut visit: F,
) -> LoadResult<Vec<String>>
where
    F: FnMut(usize, Vec<String>) -> LoadResult<()>,
{
    let mut reader = io_utils::open_csv_reader(bytes, delimiter);
    let headers = read_headers(&mut reader, table, encoding)?;
    for (row_idx, record) in reader.byte_records().enumerate() {
        let row = row_idx + 2;
        let record = record.map_err(|source| LoadError::Csv { table, source })?;
        let decoded = io_utils::decode_record(&record, encoding).map_err(|err| {
            LoadError::Decode {
                table,
                row,
                message: err.to_string(),
            }
        })?;
        visit(row, decoded)?;
    }
    Ok(headers)
}

fn read_regions(bytes: &[u8], options: &LoadOptions) -> LoadResult<HashMap<String, Vec<Region>>> {
    let mut rows = Vec::new();
    let headers = read_rows(
        bytes,
        options.regions_delimiter,
        TableKind::Regions,
        options.encoding,
        |_, record| {
            rows.push(record);
            Ok(())
        },
    )?;
    let columns = RegionColumns::resolve(&headers)?;

    let mut lookup: HashMap<String, Vec<Region>> = HashMap::new();
    for record in rows {
        let Some(noc) = non_null(field(&record, columns.noc)) else {
            debug!("Skipping region mapping without a NOC code");
            continue;
        };
        lookup.entry(noc.to_string()).or_default().push(Region {
            noc: noc.to_string(),
            region: optional_text(field(&record, columns.region)),
            notes: optional_text(optional_field(&record, columns.notes)),
        });
    }
    Ok(lookup)
}

fn read_events(bytes: &[u8], options: &LoadOptions) -> LoadResult<Vec<AthleteEvent>> {
    let mut rows = Vec::new();
    let headers = read_rows(
        bytes,
        options.events_delimiter,
        TableKind::Events,
        options.encoding,
        |row, record| {
            rows.push((row, record));
            Ok(())
        },
    )?;
    let columns = EventColumns::resolve(&headers)?;

    Ok(rows
        .into_iter()
        .map(|(row, record)| parse_event(row, &record, &columns))
        .collect())
}

fn parse_event(row: usize, record: &[String], columns: &EventColumns) -> AthleteEvent {
    let raw_medal = field(record, columns.medal);
    let medal = Medal::parse(raw_medal);
    if medal == Medal::Other {
        debug!("Row {row}: unrecognized medal '{}'", raw_medal.trim());
    }
    AthleteEvent {
        id: optional_text(optional_field(record, columns.id)),
        name: optional_text(field(record, columns.name)),
        sex: optional_text(field(record, columns.sex)),
        age: parse_lenient_f64(optional_field(record, columns.age)),
        height: parse_lenient_f64(optional_field(record, columns.height)),
        weight: parse_lenient_f64(optional_field(record, columns.weight)),
        team: optional_text(optional_field(record, columns.team)),
        noc: optional_text(field(record, columns.noc)),
        games: optional_text(field(record, columns.games)),
        year: parse_lenient_year(field(record, columns.year)),
        season: optional_text(field(record, columns.season)),
        city: optional_text(optional_field(record, columns.city)),
        sport: optional_text(field(record, columns.sport)),
        event: optional_text(field(record, columns.event)),
        medal,
        region: None,
        notes: None,
    }
}

fn is_incomplete(event: &AthleteEvent) -> bool {
    [
        &event.name,
        &event.sex,
        &event.noc,
        &event.games,
        &event.season,
        &event.sport,
        &event.event,
    ]
    .iter()
    .any(|value| value.is_none())
}

fn left_join(
    events: Vec<AthleteEvent>,
    lookup: &HashMap<String, Vec<Region>>,
    stats: &mut LoadStats,
) -> Vec<AthleteEvent> {
    let mut joined = Vec::with_capacity(events.len());
    for event in events {
        let bucket = event
            .noc
            .as_deref()
            .and_then(|noc| lookup.get(noc))
            .map(Vec::as_slice);
        match bucket {
            None | Some([]) => {
                stats.unmatched_rows += 1;
                joined.push(event);
            }
            Some([single]) => joined.push(with_region(event, single)),
            Some(bucket) => {
                stats.fanout_rows += bucket.len() - 1;
                for region in bucket {
                    joined.push(with_region(event.clone(), region));
                }
            }
        }
    }
    joined
}

fn with_region(mut event: AthleteEvent, region: &Region) -> AthleteEvent {
    event.region = region.region.clone();
    event.notes = region.notes.clone();
    event
}

/// Projects medal rows onto the team-medal key and drops exact duplicates,
/// keeping the first occurrence's position. Medals without a NOC have no
/// country to count towards and are left out.
pub fn derive_team_medals(records: &[AthleteEvent]) -> Vec<TeamMedal> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(TeamMedal::from_record)
        .filter(|medal| seen.insert(medal.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS: &str = "ID,Name,Sex,Age,Height,Weight,Team,NOC,Games,Year,Season,City,Sport,Event,Medal\n\
1,A,M,24,180,80,USA,USA,2000 Summer,2000,Summer,Sydney,Basketball,Basketball Men's Basketball,Gold\n\
2,B,M,NA,NA,NA,USA,USA,2000 Summer,2000,Summer,Sydney,Basketball,Basketball Men's Basketball,Gold\n\
3,C,F,19,165,55,Kenya,KEN,2000 Summer,2000,Summer,Sydney,Athletics,Athletics Women's 800 metres,NA\n";

    const REGIONS: &str = "NOC,region,notes\nUSA,USA,\nKEN,Kenya,\n";

    #[test]
    fn team_members_share_one_team_medal() {
        let dataset =
            load_dataset(EVENTS.as_bytes(), REGIONS.as_bytes(), &LoadOptions::default())
                .expect("load");
        assert_eq!(dataset.records.len(), 3);
        assert_eq!(dataset.team_medals.len(), 1);
        assert_eq!(dataset.team_medals[0].noc, "USA");
        assert_eq!(dataset.records[1].age, None);
        assert_eq!(dataset.records[2].medal, Medal::NoMedal);
        assert_eq!(dataset.records[2].region.as_deref(), Some("Kenya"));
    }

    #[test]
    fn ragged_rows_fail_with_table_context() {
        let broken = "Name,Sex,NOC,Games,Year,Season,Sport,Event,Medal\nA,M,USA\n";
        let err = load_dataset(broken.as_bytes(), REGIONS.as_bytes(), &LoadOptions::default())
            .expect_err("ragged row");
        assert!(matches!(
            err,
            LoadError::Csv {
                table: TableKind::Events,
                ..
            }
        ));
    }
}
