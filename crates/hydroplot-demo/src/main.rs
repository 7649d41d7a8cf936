// File: crates/hydroplot-demo/src/main.rs
// Summary: Demo loads an observed/simulated discharge CSV (or synthesises one) and renders every chart kind to target/out.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use hydroplot_core::plots::{self, HistogramStyle, WaterBalance};
use hydroplot_core::{theme, Color, PlotOptions, PlotOptionsBuilder, SeriesMap, Theme};
use log::{info, warn};

const OUT_DIR: &str = "target/out";
const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Daily observed and simulated discharge on a shared date index.
struct Record {
    dates: Vec<DateTime<Utc>>,
    obs: Vec<f64>,
    sim: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let input = args.next().filter(|a| a != "-");
    let theme = theme::find(&args.next().unwrap_or_else(|| "light".into()));
    info!("theme: {}", theme.name);

    let (record, stem) = match input {
        Some(raw) => {
            let path = PathBuf::from(&raw);
            let rec = load_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| "input".into());
            (rec, stem)
        }
        None => {
            info!("no input given; synthesising three water years of daily flows");
            (synthesise(3 * 365), "synthetic".to_string())
        }
    };
    info!("loaded {} rows", record.dates.len());
    if record.dates.is_empty() {
        bail!("no rows loaded; check the date,obs,sim header");
    }

    render_all(&record, &stem, theme)?;
    info!("charts written to {OUT_DIR}/");
    Ok(())
}

fn render_all(rec: &Record, stem: &str, theme: Theme) -> Result<()> {
    let out = |kind: &str| out_name(stem, kind);
    let base = || -> PlotOptionsBuilder { PlotOptions::builder().theme(theme) };
    let defaults = base().build();

    let path = out("obssim");
    plots::obs_sim(&path, &rec.obs, &rec.sim, &defaults).context("hydrograph")?;
    info!("wrote {}", path.display());

    let path = out("fdc");
    plots::obs_sim_fdc(&path, &rec.obs, &rec.sim, &defaults).context("flow-duration curves")?;
    info!("wrote {}", path.display());

    let mut both = SeriesMap::new();
    both.insert("obs".into(), rec.obs.clone());
    both.insert("sim".into(), rec.sim.clone());

    let path = out("temporal");
    let opts = base().y_label("discharge").build();
    plots::temporal(&path, &rec.dates, &both, &opts).context("temporal chart")?;
    info!("wrote {}", path.display());

    let xs: Vec<f64> = (0..rec.dates.len()).map(|i| i as f64).collect();
    let path = out("line");
    plots::line(&path, &xs, &both, &base().x_label("day").build()).context("line chart")?;
    info!("wrote {}", path.display());

    let mut colours = BTreeMap::new();
    colours.insert("obs".to_string(), Color::from_rgb(0, 0, 0));
    colours.insert("sim".to_string(), Color::from_rgb(0, 150, 136));
    let path = out("line_colored");
    plots::line_colored(&path, &xs, &both, &colours, &defaults).context("coloured line chart")?;
    info!("wrote {}", path.display());

    let path = out("scatter11");
    let opts = base().x_label("observed").y_label("simulated").build();
    plots::scatter_identity(&path, &rec.obs, &rec.sim, &opts).context("one-to-one scatter")?;
    info!("wrote {}", path.display());

    let path = out("scatter");
    plots::scatter(&path, &rec.obs, &rec.sim, &opts).context("scatter")?;
    info!("wrote {}", path.display());

    let finite: Vec<f64> = rec.obs.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        warn!("observed record has no finite values; skipping histogram");
    } else {
        let path = out("histogram");
        plots::histogram(&path, &finite, HistogramStyle::default(), &defaults).context("histogram")?;
        info!("wrote {}", path.display());
    }

    let path = out("histogram_gt0");
    match plots::histogram_positive(&path, &rec.obs, 0, &defaults) {
        Ok(()) => info!("wrote {}", path.display()),
        Err(e) => warn!("skipping positive-flow histogram: {e}"),
    }

    let obs_monthly = monthly_means(&rec.dates, &rec.obs);
    let sim_monthly = monthly_means(&rec.dates, &rec.sim);

    let path = out("bar");
    let opts = base().y_label("mean discharge").build();
    plots::bar(&path, &obs_monthly, &MONTHS, &opts).context("monthly bar chart")?;
    info!("wrote {}", path.display());

    let path = out("grouped_bar");
    let groups = [("obs", obs_monthly.clone()), ("sim", sim_monthly.clone())];
    plots::grouped_bar(&path, &groups, &MONTHS, &defaults).context("grouped bar chart")?;
    info!("wrote {}", path.display());

    let months: Vec<f64> = (1..=12).map(f64::from).collect();
    let path = out("line_points");
    plots::line_points(&path, &months, &[obs_monthly, sim_monthly], &defaults).context("monthly line chart")?;
    info!("wrote {}", path.display());

    let balance = water_balance_from(&rec.sim);
    let wb = WaterBalance {
        precipitation: &balance[0],
        evapotranspiration: &balance[1],
        runoff: &balance[2],
        recharge: &balance[3],
        storage: &balance[4],
    };
    let path = out("wbal");
    plots::water_balance(&path, &wb, &defaults).context("water balance chart")?;
    info!("wrote {}", path.display());

    Ok(())
}

fn out_name(stem: &str, kind: &str) -> PathBuf {
    Path::new(OUT_DIR).join(format!("{stem}_{kind}.png"))
}

fn load_csv(path: &Path) -> Result<Record> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = rdr.headers()?.iter().map(|h| h.to_ascii_lowercase()).collect::<Vec<_>>();
    info!("headers: {headers:?}");
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let (Some(i_date), Some(i_obs), Some(i_sim)) = (
        idx(&["date", "datetime", "time"]),
        idx(&["obs", "observed", "qobs"]),
        idx(&["sim", "simulated", "qsim"]),
    ) else {
        bail!("expected columns date, obs and sim; found {headers:?}");
    };

    let mut rec = Record { dates: Vec::new(), obs: Vec::new(), sim: Vec::new() };
    for (line, row) in rdr.records().enumerate() {
        let row = row?;
        let Some(date) = row.get(i_date).and_then(parse_date) else {
            warn!("row {}: unreadable date {:?}; skipped", line + 2, row.get(i_date));
            continue;
        };
        rec.dates.push(date);
        rec.obs.push(parse_value(row.get(i_obs)));
        rec.sim.push(parse_value(row.get(i_sim)));
    }
    Ok(rec)
}

/// `YYYY-MM-DD` or epoch seconds.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    s.parse::<i64>().ok().and_then(|n| DateTime::from_timestamp(n, 0))
}

/// Blank or unparsable cells are missing data.
fn parse_value(cell: Option<&str>) -> f64 {
    cell.and_then(|s| s.parse::<f64>().ok()).unwrap_or(f64::NAN)
}

/// Mean of the finite values per calendar month; 0 for months without data.
fn monthly_means(dates: &[DateTime<Utc>], values: &[f64]) -> Vec<f64> {
    let mut sum = [0.0; 12];
    let mut count = [0usize; 12];
    for (d, &v) in dates.iter().zip(values) {
        if v.is_finite() {
            let m = d.month0() as usize;
            sum[m] += v;
            count[m] += 1;
        }
    }
    sum.iter().zip(count).map(|(&s, n)| if n == 0 { 0.0 } else { s / n as f64 }).collect()
}

/// A toy bucket model driven backwards from discharge, enough to populate the
/// water-balance chart: pre, aet, ro, rch, sto.
fn water_balance_from(runoff: &[f64]) -> [Vec<f64>; 5] {
    let mut out: [Vec<f64>; 5] = Default::default();
    let mut storage = 100.0;
    for (i, &ro) in runoff.iter().enumerate() {
        let ro = if ro.is_finite() { ro } else { 0.0 };
        let pre = ro * 1.8 + 2.0 * ((i as f64) * 0.05).sin().max(0.0);
        let aet = 1.0 + 0.8 * ((i as f64) * std::f64::consts::TAU / 365.0).sin().abs();
        let rch = 0.1 * pre;
        storage += pre - aet - ro - rch;
        for (slot, v) in out.iter_mut().zip([pre, aet, ro, rch, storage]) {
            slot.push(v);
        }
    }
    out
}

/// Seasonal discharge with dry spells, a few gauge outages, and a simulation
/// that lags and damps the observations.
fn synthesise(days: usize) -> Record {
    let start = Utc.with_ymd_and_hms(2005, 10, 1, 0, 0, 0).single().unwrap_or_default();
    let mut rec = Record { dates: Vec::with_capacity(days), obs: Vec::with_capacity(days), sim: Vec::with_capacity(days) };
    for i in 0..days {
        let t = i as f64;
        let season = (t * std::f64::consts::TAU / 365.0).cos();
        let storm = if i % 23 < 3 { 25.0 / (1.0 + (i % 23) as f64) } else { 0.0 };
        let base = (8.0 * season + 6.0).max(0.0);
        let obs = if i % 151 == 40 { f64::NAN } else { base + storm };
        let lagged = if i == 0 { base } else { (8.0 * ((t - 2.0) * std::f64::consts::TAU / 365.0).cos() + 6.0).max(0.0) };
        rec.dates.push(start + Duration::days(i as i64));
        rec.obs.push(obs);
        rec.sim.push(lagged + storm * 0.7);
    }
    rec
}
