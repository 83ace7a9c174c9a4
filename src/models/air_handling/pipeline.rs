//! Sequential processing engine.
//!
//! Blocks run strictly in insertion order, once per run. Every block's flow
//! inlet is bound to the outlet of the block added before it, and mixing
//! ports can be bound to any earlier block. Since a port may only read from an
//! earlier position, the pipeline can never contain a cycle.

use tracing::{debug, warn};

use super::{
    FlowState, ProcessError,
    block::{Connector, ProcessBlock},
    process::{ProcessResult, ProcessType},
};

/// A flow port on a block, as a target for [`SequentialProcessingEngine::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPort {
    /// The main flow inlet.
    Inlet,
    /// The auxiliary flow connector at this index, such as a mixing port.
    Auxiliary(usize),
}

/// Ordered pipeline of process blocks.
#[derive(Debug, Default)]
pub struct SequentialProcessingEngine {
    blocks: Vec<Box<dyn ProcessBlock>>,
    results: Vec<ProcessResult>,
}

impl SequentialProcessingEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `block` and returns its index.
    ///
    /// Unless it is the first block, its inlet is bound to the outlet of the
    /// previous block.
    pub fn add_process_node<B: ProcessBlock + 'static>(&mut self, mut block: B) -> usize {
        let index = self.blocks.len();
        if let Some(previous) = index.checked_sub(1) {
            block.input_connector_mut().bind(previous);
        }
        self.blocks.push(Box::new(block));
        index
    }

    /// Binds a flow port of block `target` to the outlet of block `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Wiring`] unless `source < target < len`, or if
    /// the target block has no such port.
    pub fn connect(
        &mut self,
        source: usize,
        target: usize,
        port: FlowPort,
    ) -> Result<(), ProcessError> {
        if source >= target || target >= self.blocks.len() {
            return Err(ProcessError::wiring(format!(
                "cannot connect block {source} to block {target} in a pipeline of {}",
                self.blocks.len()
            )));
        }

        let block = &mut self.blocks[target];
        match port {
            FlowPort::Inlet => block.input_connector_mut().bind(source),
            FlowPort::Auxiliary(i) => {
                let Some(slot) = block.auxiliary_flow_connectors_mut().into_iter().nth(i) else {
                    return Err(ProcessError::wiring(format!(
                        "block {target} has no flow port {i}"
                    )));
                };
                slot.bind(source);
            }
        }
        Ok(())
    }

    /// Runs every block in order and returns the last result.
    ///
    /// Bound connectors are refreshed from their source outlets before each
    /// block runs. All results are stored until the next run.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::MissingArgument`] for an empty pipeline, or the
    /// first error raised by a block. The remaining blocks are skipped and no
    /// results are kept.
    pub fn run_calculations_for_all_nodes(&mut self) -> Result<ProcessResult, ProcessError> {
        self.results.clear();
        if self.blocks.is_empty() {
            return Err(ProcessError::missing("process blocks"));
        }

        let mut results = Vec::with_capacity(self.blocks.len());
        for index in 0..self.blocks.len() {
            match self.run_node(index) {
                Ok(result) => results.push(result),
                Err(error) => {
                    warn!(node = index, %error, "pipeline run aborted");
                    return Err(error);
                }
            }
        }

        self.results = results;
        self.results
            .last()
            .cloned()
            .ok_or_else(|| ProcessError::missing("process results"))
    }

    fn run_node(&mut self, index: usize) -> Result<ProcessResult, ProcessError> {
        let (upstream, rest) = self.blocks.split_at_mut(index);
        let upstream: &[Box<dyn ProcessBlock>] = upstream;
        let block = &mut rest[0];

        pull(block.input_connector_mut(), upstream)?;
        for connector in block.auxiliary_flow_connectors_mut() {
            pull(connector, upstream)?;
        }

        let result = block.run_process_calculations()?;
        debug!(
            node = index,
            process = ?result.process_type(),
            "pipeline node computed"
        );
        Ok(result)
    }

    /// Results of the last successful run, in block order.
    #[must_use]
    pub fn process_results(&self) -> &[ProcessResult] {
        &self.results
    }

    /// Results of the last successful run with the given process type.
    #[must_use]
    pub fn results(&self, process_type: ProcessType) -> Vec<&ProcessResult> {
        self.results
            .iter()
            .filter(|r| r.process_type() == process_type)
            .collect()
    }

    #[must_use]
    pub fn block(&self, index: usize) -> Option<&dyn ProcessBlock> {
        self.blocks.get(index).map(|block| &**block)
    }

    pub fn block_mut(&mut self, index: usize) -> Option<&mut (dyn ProcessBlock + 'static)> {
        self.blocks.get_mut(index).map(|block| &mut **block)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Refreshes a bound connector from its source's outlet.
fn pull(
    connector: &mut Connector<FlowState>,
    upstream: &[Box<dyn ProcessBlock>],
) -> Result<(), ProcessError> {
    let Some(source) = connector.source() else {
        return Ok(());
    };
    let flow = upstream
        .get(source)
        .and_then(|block| block.output_connector().value().copied())
        .ok_or_else(|| ProcessError::missing(format!("outlet flow of block {source}")))?;
    connector.refresh(flow);
    Ok(())
}
