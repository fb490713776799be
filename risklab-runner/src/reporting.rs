//! Human-readable reports rendered from a snapshot.
//!
//! Two formats: a fixed-width text report for terminals and logs, and a
//! self-contained HTML page for sharing. Both render only the snapshot,
//! never recompute anything.

use risklab_core::{Snapshot, Stance};

fn signed(value: f64) -> String {
    format!("{value:+.3}")
}

fn opt_signed(value: Option<f64>) -> String {
    value.map(signed).unwrap_or_else(|| "n/a".to_string())
}

/// Fixed-width text report.
pub fn text_report(snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity(1024);
    let rule = "=".repeat(54);
    let thin = "-".repeat(54);

    out.push_str(&rule);
    out.push_str("\n GLOBAL RISK INDICATOR\n");
    out.push_str(&format!(" As of {}\n", snapshot.as_of));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        " GRI:             {}  ({})\n",
        opt_signed(snapshot.gri),
        snapshot.stance.label()
    ));
    out.push_str(&format!(
        " Market cycle:    {}\n",
        opt_signed(snapshot.market_cycle)
    ));
    out.push_str(&format!(
        " Economic cycle:  {}\n",
        opt_signed(snapshot.economic_cycle)
    ));

    if let Some(row) = &snapshot.latest_signal {
        out.push_str(&thin);
        out.push('\n');
        out.push_str(&format!(
            " Sub-signals:     momentum {:+} | trend {:+} | seasonality {:+}\n",
            row.momentum, row.trend, row.seasonality
        ));
        out.push_str(&format!(
            " Consensus:       {:+} -> {}\n",
            row.consensus,
            row.label.label()
        ));
    }

    if !snapshot.ranking.is_empty() {
        out.push_str(&thin);
        out.push_str("\n ASSET CLASS POSITIONING\n");
        for (i, entry) in snapshot.ranking.iter().enumerate() {
            out.push_str(&format!(
                " {:>2}. {:<24} {}  {}\n",
                i + 1,
                entry.class_name,
                signed(entry.value),
                entry.position.label()
            ));
        }
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

/// Self-contained HTML report.
pub fn html_report(snapshot: &Snapshot) -> String {
    let stance_color = match snapshot.stance {
        Stance::Aggressive => "#1b7837",
        Stance::Neutral => "#666666",
        Stance::Defensive => "#b2182b",
    };

    let mut rows = String::new();
    for (i, entry) in snapshot.ranking.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            i + 1,
            entry.class_name,
            signed(entry.value),
            entry.position.full_name()
        ));
    }

    let signals = snapshot
        .latest_signal
        .as_ref()
        .map(|row| {
            format!(
                "<p>Momentum {:+} &middot; Trend {:+} &middot; Seasonality {:+} \
                 &rarr; consensus {:+} ({})</p>",
                row.momentum,
                row.trend,
                row.seasonality,
                row.consensus,
                row.label.label()
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Global Risk Indicator — {as_of}</title>
<style>
body {{ font-family: sans-serif; max-width: 720px; margin: 2em auto; color: #222; }}
h1 {{ font-size: 1.4em; }}
.stance {{ color: {stance_color}; font-weight: bold; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ccc; padding: 4px 10px; text-align: left; }}
th {{ background: #f2f2f2; }}
</style>
</head>
<body>
<h1>Global Risk Indicator <small>as of {as_of}</small></h1>
<p>GRI: <span class="stance">{gri} ({stance})</span></p>
<p>Market cycle {market} &middot; Economic cycle {economic}</p>
{signals}
<h2>Asset class positioning</h2>
<table>
<tr><th>#</th><th>Asset class</th><th>Indicator</th><th>Position</th></tr>
{rows}</table>
</body>
</html>
"#,
        as_of = snapshot.as_of,
        gri = opt_signed(snapshot.gri),
        stance = snapshot.stance.label(),
        market = opt_signed(snapshot.market_cycle),
        economic = opt_signed(snapshot.economic_cycle),
        signals = signals,
        rows = rows,
    )
}
