//! Zero / nonzero run coding of sample buffers
//! Stream layout: repeated cycles of [zero-run length][nonzero-run length][one delta code per nonzero sample]
//! Deltas are taken between consecutive nonzero samples; zero samples do not reset the previous value.

use crate::error::{Result, RvlError};
use crate::vle::{NibbleReader, NibbleWriter};
use crate::zigzag;

/// One zero-run followed by one nonzero-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunDescriptor {
    pub zeros: u32,
    pub nonzeros: u32,
}

/// Splits a sample buffer into alternating zero / nonzero runs.
///
/// Yields each descriptor together with the nonzero samples it covers.
///
/// Runs longer than `u32::MAX` samples are split: a zero-run continues in the
/// next cycle after an empty nonzero-run, a nonzero-run continues after an
/// empty zero-run. Both forms expand back to the same samples.
pub struct Runs<'a> {
    samples: &'a [u16],
    cursor: usize,
    max_run: usize,
}

impl<'a> Runs<'a> {
    pub fn new(samples: &'a [u16]) -> Self {
        Self::with_max_run(samples, u32::MAX as usize)
    }

    pub(crate) fn with_max_run(samples: &'a [u16], max_run: usize) -> Self {
        Self { samples, cursor: 0, max_run }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = (RunDescriptor, &'a [u16]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.samples.len() {
            return None;
        }
        let rest = &self.samples[self.cursor..];
        let zeros = rest.iter().take(self.max_run).take_while(|&&s| s == 0).count();
        let nonzeros = rest[zeros..].iter().take(self.max_run).take_while(|&&s| s != 0).count();
        let values = &rest[zeros..zeros + nonzeros];
        self.cursor += zeros + nonzeros;

        // both counts are capped at max_run <= u32::MAX
        let run = RunDescriptor { zeros: zeros as u32, nonzeros: nonzeros as u32 };
        Some((run, values))
    }
}

/// Encodes every run of `samples` into `writer`.
pub fn scan(samples: &[u16], writer: &mut NibbleWriter<'_>) -> Result<()> {
    scan_runs(Runs::new(samples), writer)
}

fn scan_runs(runs: Runs<'_>, writer: &mut NibbleWriter<'_>) -> Result<()> {
    let mut previous = 0i32;
    for (run, values) in runs {
        writer.encode(run.zeros)?;
        writer.encode(run.nonzeros)?;
        for &sample in values {
            let current = i32::from(sample);
            writer.encode(zigzag::encode(current - previous))?;
            previous = current;
        }
    }
    Ok(())
}

/// Rebuilds exactly `output.len()` samples from `reader`.
pub fn expand(reader: &mut NibbleReader<'_>, output: &mut [u16]) -> Result<()> {
    let mut cursor = 0usize;
    let mut previous = 0i32;

    while cursor < output.len() {
        let remaining = output.len() - cursor;

        let zeros = reader.decode()? as usize;
        if zeros > remaining {
            return Err(overrun("zero", zeros, remaining));
        }
        output[cursor..cursor + zeros].fill(0);
        cursor += zeros;

        let remaining = output.len() - cursor;
        let nonzeros = reader.decode()? as usize;
        if nonzeros > remaining {
            return Err(overrun("nonzero", nonzeros, remaining));
        }
        if zeros == 0 && nonzeros == 0 {
            return Err(RvlError::corrupt(format!("empty run cycle at sample {cursor}")));
        }

        for slot in &mut output[cursor..cursor + nonzeros] {
            let delta = zigzag::decode(reader.decode()?);
            let current = previous.checked_add(delta).ok_or_else(|| {
                RvlError::corrupt(format!("delta {delta} overflows previous sample {previous}"))
            })?;
            *slot = u16::try_from(current)
                .ok()
                .filter(|&s| s != 0)
                .ok_or_else(|| {
                    RvlError::corrupt(format!("nonzero sample decoded as {current}"))
                })?;
            previous = current;
        }
        cursor += nonzeros;
    }
    Ok(())
}

fn overrun(kind: &str, len: usize, remaining: usize) -> RvlError {
    RvlError::corrupt(format!(
        "{kind} run of {len} samples overruns the {remaining} samples left"
    ))
}
