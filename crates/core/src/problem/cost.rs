use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Linear least-squares stage cost.
///
/// The stage output is `y = Vx x + Vu u`, penalized as `(y - yref)ᵀ W (y - yref)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    /// Weight matrix, `ny × ny`.
    #[serde(rename = "W")]
    pub w: Array2<f64>,

    /// State output map, `ny × nx`.
    #[serde(rename = "Vx")]
    pub vx: Array2<f64>,

    /// Control output map, `ny × nu`.
    #[serde(rename = "Vu")]
    pub vu: Array2<f64>,

    /// Output reference, length `ny`.
    pub yref: Array1<f64>,
}

/// Linear least-squares terminal cost.
///
/// The terminal output is `y_e = Vx_e x`, penalized as
/// `(y_e - yref_e)ᵀ W_e (y_e - yref_e)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalCost {
    /// Weight matrix, `ny_e × ny_e`.
    #[serde(rename = "W_e")]
    pub w: Array2<f64>,

    /// State output map, `ny_e × nx`.
    #[serde(rename = "Vx_e")]
    pub vx: Array2<f64>,

    /// Output reference, length `ny_e`.
    #[serde(rename = "yref_e")]
    pub yref: Array1<f64>,
}
