use crate::error::{LiveError, Result};
use crate::node::NodeConfig;
use crate::request::RequestParams;

/// Query parameter carrying the window start.
pub const START_PARAM: &str = "stime";
/// Query parameter carrying the window end.
pub const END_PARAM: &str = "etime";
/// Query parameter carrying the selected module.
pub const MODULE_PARAM: &str = "module";

/// Time window and module a dashboard render refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub stime: i64,
    pub etime: i64,
    pub module: String,
}

impl TimeWindow {
    /// Resolve the window from request parameters.
    ///
    /// Missing bounds default to the last `time_period` seconds ending at the
    /// reference time floored to `time_bound`. The reference time is the
    /// node's own clock when it reported one, `now` otherwise.
    pub fn resolve(
        params: &RequestParams,
        node: &NodeConfig,
        default_module: &str,
        now: i64,
    ) -> Result<Self> {
        let reference = node.info().current_time.unwrap_or(now);

        let etime = match parse_time(params, END_PARAM)? {
            Some(etime) => etime,
            None => align(reference, node.time_bound())?,
        };
        let stime = match parse_time(params, START_PARAM)? {
            Some(stime) => stime,
            None => etime.checked_sub(node.time_period()).ok_or_else(|| {
                LiveError::InvalidRange(format!("etime {} too small for period", etime))
            })?,
        };

        if etime < stime {
            return Err(LiveError::InvalidRange(format!(
                "etime {} precedes stime {}",
                etime, stime
            )));
        }

        let module = params
            .get_non_empty(MODULE_PARAM)
            .unwrap_or(default_module)
            .to_string();

        Ok(Self {
            stime,
            etime,
            module,
        })
    }

    /// Window length in seconds.
    pub fn interval(&self) -> Result<i64> {
        self.etime.checked_sub(self.stime).ok_or_else(|| {
            LiveError::InvalidRange(format!(
                "interval between {} and {} overflows",
                self.stime, self.etime
            ))
        })
    }
}

fn parse_time(params: &RequestParams, key: &str) -> Result<Option<i64>> {
    match params.get_non_empty(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| LiveError::InvalidRange(format!("{} is not a timestamp: {:?}", key, raw))),
    }
}

fn align(time: i64, bound: i64) -> Result<i64> {
    if bound <= 0 {
        return Err(LiveError::InvalidRange(format!(
            "time bound must be positive, got {}",
            bound
        )));
    }
    time.div_euclid(bound)
        .checked_mul(bound)
        .ok_or_else(|| LiveError::InvalidRange(format!("time {} cannot be aligned to {}", time, bound)))
}
