/// Aggregated counters for one pipeline run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub raw_discovered: usize,
    pub headshots_resolved: usize,
    pub headshots_dropped: usize,
    pub filter_included: usize,
    pub filter_excluded: usize,
    pub dedup_removed: usize,
    pub exported: usize,
    pub uploaded_ok: usize,
    pub upload_failed: usize,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Pipeline Run Complete ===")?;
        writeln!(f, "Raw candidates:     {}", self.raw_discovered)?;
        writeln!(f, "Headshots resolved: {}", self.headshots_resolved)?;
        writeln!(f, "Headshots dropped:  {}", self.headshots_dropped)?;
        writeln!(f, "Filter included:    {}", self.filter_included)?;
        writeln!(f, "Filter excluded:    {}", self.filter_excluded)?;
        writeln!(f, "Dedup removed:      {}", self.dedup_removed)?;
        writeln!(f, "Exported:           {}", self.exported)?;
        if self.uploaded_ok > 0 || self.upload_failed > 0 {
            writeln!(f, "Uploaded ok:        {}", self.uploaded_ok)?;
            writeln!(f, "Upload failed:      {}", self.upload_failed)?;
        }
        Ok(())
    }
}
