/// One invocation's worth of user intent. Built once from the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRequest {
    pub dut: String,
    /// Top-level simulation unit; `<dut>_tb` when absent.
    pub top: Option<String>,
    /// Accepted for compatibility with existing invocations; not interpreted.
    pub cfg: Option<String>,
    pub clean: bool,
    pub hw: bool,
    pub sim: bool,
    pub gui: bool,
    pub verbose: bool,
}

impl BuildRequest {
    #[cfg(test)]
    pub fn new(dut: impl Into<String>) -> Self {
        Self {
            dut: dut.into(),
            ..Self::default()
        }
    }

    pub fn top_name(&self) -> String {
        self.top
            .clone()
            .unwrap_or_else(|| format!("{}_tb", self.dut))
    }
}
