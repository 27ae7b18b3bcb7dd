//! Command execution: resolve inputs and filters, compute views, emit them.

use std::{io::Write, path::PathBuf, sync::Arc};

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use serde::Serialize;

use crate::{
    athletes::{self, AthleteMedals},
    cache::DatasetCache,
    cli::{Commands, DatasetArgs, FilterArgs, OutputArgs, RankedArgs, ViewArgs},
    config::{DashboardConfig, TopLimits},
    filter::{self, DashboardFilter},
    io_utils,
    kpi::{self, Kpis},
    loader::{Dataset, LoadOptions},
    medals::{self, CountryMedals, MedalCount, YearMedals},
    output::{self, Emit, OutputFormat},
    participation::{self, CountryParticipation, GenderParticipation, SportEntries},
    view::{Matrix, View},
};

/// Every view for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub filter: String,
    pub summary: Kpis,
    pub medals_over_time: View<Vec<YearMedals>>,
    pub medal_table: View<Matrix>,
    pub top_countries: View<Vec<CountryMedals>>,
    pub medal_breakdown: View<Vec<MedalCount>>,
    pub gender: View<Vec<GenderParticipation>>,
    pub participation: View<Vec<CountryParticipation>>,
    pub sports: View<Vec<SportEntries>>,
    pub sport_heatmap: View<Matrix>,
    pub top_athletes: View<Vec<AthleteMedals>>,
}

pub fn build_report(dataset: &Dataset, filter: &DashboardFilter, top: &TopLimits) -> Report {
    Report {
        filter: filter.describe(),
        summary: kpi::compute_kpis(dataset, filter),
        medals_over_time: medals::medals_over_time(dataset, filter),
        medal_table: medals::medal_table(dataset, filter),
        top_countries: medals::top_countries(dataset, filter, top.countries),
        medal_breakdown: medals::medal_breakdown(dataset, filter),
        gender: participation::gender_participation(dataset, filter),
        participation: participation::participation_by_country(dataset, filter),
        sports: participation::sport_popularity(dataset, filter, top.sports),
        sport_heatmap: participation::sport_heatmap(dataset, filter, top.heatmap_sports),
        top_athletes: athletes::top_athletes(dataset, filter, top.athletes),
    }
}

struct ViewContext {
    dataset: Arc<Dataset>,
    filter: DashboardFilter,
    top: TopLimits,
    format: OutputFormat,
    output: Option<PathBuf>,
}

impl ViewContext {
    fn prepare(args: &ViewArgs, cache: &DatasetCache) -> Result<Self> {
        Self::load(&args.dataset, Some(&args.filter), &args.output, cache)
    }

    /// With `filter_args` of `None` the config file's filters are ignored too.
    fn load(
        dataset: &DatasetArgs,
        filter_args: Option<&FilterArgs>,
        output_args: &OutputArgs,
        cache: &DatasetCache,
    ) -> Result<Self> {
        let config = DashboardConfig::load_optional(dataset.config.as_deref())?;
        let events_path = dataset
            .events
            .clone()
            .or(config.events.clone())
            .ok_or_else(|| {
                anyhow!("No athlete events table given; pass --events or set 'events' in the config")
            })?;
        let regions_path = dataset
            .regions
            .clone()
            .or(config.regions.clone())
            .ok_or_else(|| {
                anyhow!("No NOC regions table given; pass --regions or set 'regions' in the config")
            })?;
        if io_utils::is_dash(&regions_path) && io_utils::is_dash(&events_path) {
            return Err(anyhow!("Only one of --events and --regions can read from stdin"));
        }

        let options = LoadOptions {
            events_delimiter: io_utils::resolve_input_delimiter(&events_path, dataset.delimiter),
            regions_delimiter: io_utils::resolve_input_delimiter(
                &regions_path,
                dataset.delimiter,
            ),
            encoding: io_utils::resolve_encoding(dataset.input_encoding.as_deref())?,
        };
        let events = io_utils::read_input(&events_path)?;
        let regions = io_utils::read_input(&regions_path)?;
        let dataset = cache
            .get_or_load(&events, &regions, &options)
            .with_context(|| format!("Loading {events_path:?} with {regions_path:?}"))?;

        let filter = match filter_args {
            Some(args) => {
                let countries = if args.countries.is_empty() {
                    config.countries.clone()
                } else {
                    args.countries.clone()
                };
                DashboardFilter::new(
                    args.season.or(config.season).unwrap_or_default(),
                    args.years.or(config.years),
                    countries,
                )
            }
            None => DashboardFilter::default(),
        };
        debug!("Active filter: {}", filter.describe());

        Ok(Self {
            dataset,
            filter,
            top: config.top,
            format: output_args.format.or(config.format).unwrap_or_default(),
            output: output_args.output.clone(),
        })
    }

    fn emit<E: Emit>(&self, title: &str, value: &E) -> Result<()> {
        let mut writer = io_utils::open_output(self.output.as_deref())?;
        let delimiter = io_utils::resolve_output_delimiter(self.output.as_deref());
        output::write_section(&mut writer, title, value, self.format, delimiter)?;
        writer.flush().context("Flushing output")?;
        info!("Rendered {title} ({})", self.filter.describe());
        Ok(())
    }

    fn emit_report(&self, report: &Report) -> Result<()> {
        let mut writer = io_utils::open_output(self.output.as_deref())?;
        if self.format == OutputFormat::Json {
            serde_json::to_writer_pretty(&mut writer, report).context("Serializing report")?;
            writeln!(writer)?;
        } else {
            let delimiter = io_utils::resolve_output_delimiter(self.output.as_deref());
            let sections: [(&str, &dyn ErasedEmit); 10] = [
                ("Summary", &report.summary),
                ("Medals over time (team-adjusted)", &report.medals_over_time),
                ("Medal table (team-adjusted)", &report.medal_table),
                ("Top countries by medals", &report.top_countries),
                ("Medal breakdown by country", &report.medal_breakdown),
                ("Gender participation over time", &report.gender),
                ("Participation by country and sex", &report.participation),
                ("Top sports by participation", &report.sports),
                ("Sport participation heatmap", &report.sport_heatmap),
                ("Top athletes by medal count (team-adjusted)", &report.top_athletes),
            ];
            for (idx, (title, section)) in sections.iter().enumerate() {
                if idx > 0 {
                    writeln!(writer)?;
                }
                section.write_to(&mut writer, title, self.format, delimiter)?;
            }
        }
        writer.flush().context("Flushing report output")?;
        info!("Rendered full report ({})", self.filter.describe());
        Ok(())
    }
}

/// Object-safe shim so the report can iterate over heterogeneous sections.
trait ErasedEmit {
    fn write_to(
        &self,
        writer: &mut Box<dyn Write>,
        title: &str,
        format: OutputFormat,
        delimiter: u8,
    ) -> Result<()>;
}

impl<E: Emit> ErasedEmit for E {
    fn write_to(
        &self,
        writer: &mut Box<dyn Write>,
        title: &str,
        format: OutputFormat,
        delimiter: u8,
    ) -> Result<()> {
        output::write_section(writer, title, self, format, delimiter)
    }
}

fn ranked(args: &RankedArgs, cache: &DatasetCache) -> Result<(ViewContext, Option<usize>)> {
    Ok((ViewContext::prepare(&args.view, cache)?, args.top))
}

pub fn execute(command: &Commands, cache: &DatasetCache) -> Result<()> {
    match command {
        Commands::Summary(args) => {
            let ctx = ViewContext::prepare(args, cache)?;
            ctx.emit("Summary", &kpi::compute_kpis(&ctx.dataset, &ctx.filter))
        }
        Commands::MedalsOverTime(args) => {
            let ctx = ViewContext::prepare(args, cache)?;
            ctx.emit(
                "Medals over time (team-adjusted)",
                &medals::medals_over_time(&ctx.dataset, &ctx.filter),
            )
        }
        Commands::MedalTable(args) => {
            let ctx = ViewContext::prepare(args, cache)?;
            ctx.emit(
                "Medal table (team-adjusted)",
                &medals::medal_table(&ctx.dataset, &ctx.filter),
            )
        }
        Commands::TopCountries(args) => {
            let (ctx, top) = ranked(args, cache)?;
            let top = top.unwrap_or(ctx.top.countries);
            ctx.emit(
                &format!("Top {top} countries by medals"),
                &medals::top_countries(&ctx.dataset, &ctx.filter, top),
            )
        }
        Commands::MedalBreakdown(args) => {
            let ctx = ViewContext::prepare(args, cache)?;
            ctx.emit(
                "Medal breakdown by country",
                &medals::medal_breakdown(&ctx.dataset, &ctx.filter),
            )
        }
        Commands::Gender(args) => {
            let ctx = ViewContext::prepare(args, cache)?;
            ctx.emit(
                "Gender participation over time",
                &participation::gender_participation(&ctx.dataset, &ctx.filter),
            )
        }
        Commands::Participation(args) => {
            let ctx = ViewContext::prepare(args, cache)?;
            ctx.emit(
                "Participation by country and sex",
                &participation::participation_by_country(&ctx.dataset, &ctx.filter),
            )
        }
        Commands::Sports(args) => {
            let (ctx, top) = ranked(args, cache)?;
            let top = top.unwrap_or(ctx.top.sports);
            ctx.emit(
                &format!("Top {top} sports by participation"),
                &participation::sport_popularity(&ctx.dataset, &ctx.filter, top),
            )
        }
        Commands::SportHeatmap(args) => {
            let (ctx, top) = ranked(args, cache)?;
            let top = top.unwrap_or(ctx.top.heatmap_sports);
            ctx.emit(
                "Sport participation heatmap",
                &participation::sport_heatmap(&ctx.dataset, &ctx.filter, top),
            )
        }
        Commands::TopAthletes(args) => {
            let (ctx, top) = ranked(args, cache)?;
            let top = top.unwrap_or(ctx.top.athletes);
            ctx.emit(
                &format!("Top {top} athletes by medal count (team-adjusted)"),
                &athletes::top_athletes(&ctx.dataset, &ctx.filter, top),
            )
        }
        Commands::Report(args) => {
            let ctx = ViewContext::prepare(args, cache)?;
            let report = build_report(&ctx.dataset, &ctx.filter, &ctx.top);
            ctx.emit_report(&report)
        }
        Commands::Options(args) => {
            let ctx = ViewContext::load(&args.dataset, None, &args.output, cache)?;
            ctx.emit("Filter options", &filter::filter_options(&ctx.dataset))
        }
    }
}
