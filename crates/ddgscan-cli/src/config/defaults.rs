pub struct DefaultsConfig {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub colormap: String,
    pub splice: usize,
    pub density_kind: String,
    pub density_points: usize,
    pub density_bins: usize,
    pub threshold: f64,
    pub missing_value: f64,
    pub multimers: bool,
    pub skip_missing: bool,
    pub targets: Vec<char>,
    pub heatmap_output: String,
    pub histo_output_dir: String,
    pub alascan_output: String,
    pub density_output: String,
    pub distribution_output: String,
    pub summary_output: String,
    pub table_output: String,
    pub pdb_prefix: String,
    pub mutations_output: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            font_size: 14,
            colormap: "bwr".to_string(),
            splice: 0,
            density_kind: "kde".to_string(),
            density_points: 200,
            density_bins: 20,
            threshold: 1.0,
            missing_value: 0.0,
            multimers: true,
            skip_missing: false,
            targets: vec!['A'],
            heatmap_output: "heatmap.svg".to_string(),
            histo_output_dir: "histograms".to_string(),
            alascan_output: "alascan.svg".to_string(),
            density_output: "density.svg".to_string(),
            distribution_output: "distribution.svg".to_string(),
            summary_output: "summary.tsv".to_string(),
            table_output: "ddg_table.csv".to_string(),
            pdb_prefix: "ddg".to_string(),
            mutations_output: "mutations.csv".to_string(),
        }
    }
}
