//! Variable and asset-class catalogs.
//!
//! Every input series the engines know about has a typed catalog entry:
//! code, display name, source, native frequency, unit, transform hint,
//! and — critically — an explicit polarity tag. Sign inversion for
//! risk-flavored variables (volatility, credit spreads, unemployment,
//! claims) is driven by that tag, never by matching substrings in the
//! identifier. The 10y–2y curve slope stays `Positive` even though its
//! code contains "SPREAD"; a name-based rule would invert it.

use serde::Serialize;

/// Series codes referenced by the engines.
pub mod codes {
    pub const US_SP500: &str = "US_SP500";
    pub const US_VIX: &str = "US_VIX";
    pub const US_CREDIT_HY_SPREAD: &str = "US_CREDIT_HY_SPREAD";
    pub const US_CREDIT_IG_SPREAD: &str = "US_CREDIT_IG_SPREAD";
    pub const US_SPREAD_10Y2Y: &str = "US_SPREAD_10Y2Y";
    pub const US_FINANCIAL_CONDITIONS: &str = "US_FINANCIAL_CONDITIONS";
    pub const US_CFNAI: &str = "US_CFNAI";
    pub const US_ISM_MANUFACTURING: &str = "US_ISM_MANUFACTURING";
    pub const US_UNEMPLOYMENT_RATE: &str = "US_UNEMPLOYMENT_RATE";
    pub const US_INDUSTRIAL_PRODUCTION: &str = "US_INDUSTRIAL_PRODUCTION";
    pub const US_INITIAL_CLAIMS: &str = "US_INITIAL_CLAIMS";
    pub const US_FED_FUNDS_RATE: &str = "US_FED_FUNDS_RATE";
    pub const US_YIELD_3M: &str = "US_YIELD_3M";
    pub const US_YIELD_2Y: &str = "US_YIELD_2Y";
    pub const US_YIELD_10Y: &str = "US_YIELD_10Y";
    pub const US_MOVE: &str = "US_MOVE";
    pub const EM_CREDIT_SPREAD: &str = "EM_CREDIT_SPREAD";
    pub const EM_MSCI_EM: &str = "EM_MSCI_EM";
    pub const EU_STOXX600: &str = "EU_STOXX600";
    pub const EU_VSTOXX: &str = "EU_VSTOXX";
    pub const EU_PMI_MANUFACTURING: &str = "EU_PMI_MANUFACTURING";
    pub const CN_PMI_MANUFACTURING: &str = "CN_PMI_MANUFACTURING";
    pub const FX_EURUSD: &str = "FX_EURUSD";
    pub const FX_USDJPY: &str = "FX_USDJPY";
}

/// Whether a rising value is a benefit or a risk signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Polarity {
    /// Higher values mean a friendlier risk environment.
    Positive,
    /// Higher values mean stress; the z-score is sign-flipped.
    Inverted,
}

/// Native publication frequency of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

/// Hint for the derivation applied before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transform {
    /// 126-observation (≈ 6 month) percent change.
    Momentum6M,
    /// 12-observation year-over-year percent change.
    YearOverYear,
    /// Centered at 50 and scaled by 15 (diffusion indices).
    PmiCentered,
    /// Already a z-score-like index; divide by 3 and clip.
    PreScaled,
}

/// One entry in the master variable catalog.
#[derive(Debug, Clone, Serialize)]
pub struct VariableDef {
    pub code: &'static str,
    pub name: &'static str,
    pub source: &'static str,
    pub frequency: Frequency,
    pub unit: &'static str,
    pub transform: Option<Transform>,
    pub polarity: Polarity,
}

/// The master variable catalog, in a fixed order.
pub fn variables() -> &'static [VariableDef] {
    use Frequency::*;
    use Polarity::*;
    static VARIABLES: &[VariableDef] = &[
        VariableDef {
            code: codes::US_SP500,
            name: "S&P 500 Index",
            source: "FRED",
            frequency: Daily,
            unit: "index",
            transform: Some(Transform::Momentum6M),
            polarity: Positive,
        },
        VariableDef {
            code: codes::US_VIX,
            name: "CBOE Volatility Index",
            source: "FRED",
            frequency: Daily,
            unit: "index",
            transform: None,
            polarity: Inverted,
        },
        VariableDef {
            code: codes::US_CREDIT_HY_SPREAD,
            name: "US High Yield OAS",
            source: "FRED",
            frequency: Daily,
            unit: "pct",
            transform: None,
            polarity: Inverted,
        },
        VariableDef {
            code: codes::US_CREDIT_IG_SPREAD,
            name: "US Investment Grade OAS",
            source: "FRED",
            frequency: Daily,
            unit: "pct",
            transform: None,
            polarity: Inverted,
        },
        VariableDef {
            code: codes::US_SPREAD_10Y2Y,
            name: "US 10Y-2Y Treasury Slope",
            source: "FRED",
            frequency: Daily,
            unit: "pct",
            transform: None,
            polarity: Positive,
        },
        VariableDef {
            code: codes::US_FINANCIAL_CONDITIONS,
            name: "Chicago Fed NFCI",
            source: "FRED",
            frequency: Weekly,
            unit: "index",
            transform: None,
            polarity: Inverted,
        },
        VariableDef {
            code: codes::US_CFNAI,
            name: "Chicago Fed National Activity Index",
            source: "FRED",
            frequency: Monthly,
            unit: "index",
            transform: Some(Transform::PreScaled),
            polarity: Positive,
        },
        VariableDef {
            code: codes::US_ISM_MANUFACTURING,
            name: "ISM Manufacturing PMI",
            source: "FRED",
            frequency: Monthly,
            unit: "index",
            transform: Some(Transform::PmiCentered),
            polarity: Positive,
        },
        VariableDef {
            code: codes::US_UNEMPLOYMENT_RATE,
            name: "US Unemployment Rate",
            source: "FRED",
            frequency: Monthly,
            unit: "pct",
            transform: None,
            polarity: Inverted,
        },
        VariableDef {
            code: codes::US_INDUSTRIAL_PRODUCTION,
            name: "US Industrial Production",
            source: "FRED",
            frequency: Monthly,
            unit: "index",
            transform: Some(Transform::YearOverYear),
            polarity: Positive,
        },
        VariableDef {
            code: codes::US_INITIAL_CLAIMS,
            name: "US Initial Jobless Claims",
            source: "FRED",
            frequency: Weekly,
            unit: "count",
            transform: None,
            polarity: Inverted,
        },
        VariableDef {
            code: codes::US_FED_FUNDS_RATE,
            name: "Federal Funds Effective Rate",
            source: "FRED",
            frequency: Daily,
            unit: "pct",
            transform: None,
            polarity: Positive,
        },
        VariableDef {
            code: codes::US_YIELD_3M,
            name: "US 3M Treasury Yield",
            source: "FRED",
            frequency: Daily,
            unit: "pct",
            transform: None,
            polarity: Positive,
        },
        VariableDef {
            code: codes::US_YIELD_2Y,
            name: "US 2Y Treasury Yield",
            source: "FRED",
            frequency: Daily,
            unit: "pct",
            transform: None,
            polarity: Positive,
        },
        VariableDef {
            code: codes::US_YIELD_10Y,
            name: "US 10Y Treasury Yield",
            source: "FRED",
            frequency: Daily,
            unit: "pct",
            transform: None,
            polarity: Positive,
        },
        VariableDef {
            code: codes::US_MOVE,
            name: "MOVE Treasury Volatility Index",
            source: "FRED",
            frequency: Daily,
            unit: "index",
            transform: None,
            polarity: Inverted,
        },
        VariableDef {
            code: codes::EM_CREDIT_SPREAD,
            name: "EM Sovereign Credit Spread",
            source: "FRED",
            frequency: Daily,
            unit: "pct",
            transform: None,
            polarity: Inverted,
        },
        VariableDef {
            code: codes::EM_MSCI_EM,
            name: "MSCI Emerging Markets Index",
            source: "FRED",
            frequency: Daily,
            unit: "index",
            transform: None,
            polarity: Positive,
        },
        VariableDef {
            code: codes::EU_STOXX600,
            name: "STOXX Europe 600",
            source: "OECD",
            frequency: Daily,
            unit: "index",
            transform: None,
            polarity: Positive,
        },
        VariableDef {
            code: codes::EU_VSTOXX,
            name: "VSTOXX Volatility Index",
            source: "OECD",
            frequency: Daily,
            unit: "index",
            transform: None,
            polarity: Inverted,
        },
        VariableDef {
            code: codes::EU_PMI_MANUFACTURING,
            name: "Eurozone Manufacturing PMI",
            source: "Eurostat",
            frequency: Monthly,
            unit: "index",
            transform: Some(Transform::PmiCentered),
            polarity: Positive,
        },
        VariableDef {
            code: codes::CN_PMI_MANUFACTURING,
            name: "China Manufacturing PMI",
            source: "OECD",
            frequency: Monthly,
            unit: "index",
            transform: Some(Transform::PmiCentered),
            polarity: Positive,
        },
        VariableDef {
            code: codes::FX_EURUSD,
            name: "EUR/USD Exchange Rate",
            source: "FRED",
            frequency: Daily,
            unit: "rate",
            transform: None,
            polarity: Positive,
        },
        VariableDef {
            code: codes::FX_USDJPY,
            name: "USD/JPY Exchange Rate",
            source: "FRED",
            frequency: Daily,
            unit: "rate",
            transform: None,
            polarity: Positive,
        },
    ];
    VARIABLES
}

/// Look up a catalog entry by code.
pub fn variable(code: &str) -> Option<&'static VariableDef> {
    variables().iter().find(|v| v.code == code)
}

/// Polarity for a code. Unknown codes default to `Positive` — an
/// unrecognized identifier must not silently flip a signal.
pub fn polarity(code: &str) -> Polarity {
    variable(code).map(|v| v.polarity).unwrap_or(Polarity::Positive)
}

/// One asset class and the series relevant to it.
#[derive(Debug, Clone, Serialize)]
pub struct AssetClassDef {
    pub key: &'static str,
    pub name: &'static str,
    pub variables: &'static [&'static str],
    pub description: &'static str,
}

/// The fixed asset-class catalog, in presentation order.
pub fn asset_classes() -> &'static [AssetClassDef] {
    static CLASSES: &[AssetClassDef] = &[
        AssetClassDef {
            key: "MONEY_MARKET",
            name: "Money Market",
            variables: &[codes::US_FED_FUNDS_RATE, codes::US_YIELD_3M],
            description: "Liquidity and money-market assets",
        },
        AssetClassDef {
            key: "GOVERNMENT_BONDS",
            name: "Government Bonds",
            variables: &[
                codes::US_YIELD_10Y,
                codes::US_YIELD_2Y,
                codes::US_SPREAD_10Y2Y,
                codes::US_MOVE,
            ],
            description: "Developed-market government bonds",
        },
        AssetClassDef {
            key: "CORPORATE_IG",
            name: "Corporate Investment Grade",
            variables: &[
                codes::US_CREDIT_IG_SPREAD,
                codes::US_YIELD_10Y,
                codes::US_ISM_MANUFACTURING,
            ],
            description: "Investment-grade corporate bonds",
        },
        AssetClassDef {
            key: "HIGH_YIELD",
            name: "High Yield",
            variables: &[
                codes::US_CREDIT_HY_SPREAD,
                codes::US_VIX,
                codes::US_ISM_MANUFACTURING,
            ],
            description: "High-yield corporate bonds",
        },
        AssetClassDef {
            key: "EM_DEBT",
            name: "Emerging Market Debt",
            variables: &[codes::EM_CREDIT_SPREAD, codes::US_VIX, codes::FX_EURUSD],
            description: "Emerging-market sovereign and corporate debt",
        },
        AssetClassDef {
            key: "US_EQUITY",
            name: "US Equity",
            variables: &[
                codes::US_SP500,
                codes::US_VIX,
                codes::US_CFNAI,
                codes::US_ISM_MANUFACTURING,
            ],
            description: "US large-cap equities",
        },
        AssetClassDef {
            key: "EUROPE_EQUITY",
            name: "Europe Equity",
            variables: &[
                codes::EU_STOXX600,
                codes::EU_VSTOXX,
                codes::EU_PMI_MANUFACTURING,
            ],
            description: "European equities",
        },
        AssetClassDef {
            key: "EM_EQUITY",
            name: "Emerging Market Equity",
            variables: &[
                codes::EM_MSCI_EM,
                codes::EM_CREDIT_SPREAD,
                codes::CN_PMI_MANUFACTURING,
            ],
            description: "Emerging-market equities",
        },
        AssetClassDef {
            key: "TACTICAL_EQUITY",
            name: "Tactical Equity",
            variables: &[
                codes::US_SP500,
                codes::US_VIX,
                codes::US_CREDIT_HY_SPREAD,
                codes::US_CFNAI,
            ],
            description: "Tactical equity overlay",
        },
        AssetClassDef {
            key: "ASIA_PACIFIC_EQUITY",
            name: "Asia Pacific Equity",
            variables: &[
                codes::CN_PMI_MANUFACTURING,
                codes::FX_USDJPY,
                codes::EM_MSCI_EM,
            ],
            description: "Asia-Pacific ex-Japan equities",
        },
    ];
    CLASSES
}

/// Look up an asset class by key.
pub fn asset_class(key: &str) -> Option<&'static AssetClassDef> {
    asset_classes().iter().find(|c| c.key == key)
}
