//! CSV format export for data analysis in spreadsheets and pandas.

use crate::graph::{CouplingMetrics, DependencyGraph};
use std::fmt::Write;

/// Export edges as `source,target,labels` rows, labels joined with `;`.
pub fn export_csv_edges(graph: &DependencyGraph) -> String {
    let mut output = String::from("source,target,labels\n");
    for (source, target, labels) in graph.edges() {
        let joined = labels.iter().map(String::as_str).collect::<Vec<_>>().join(";");
        let _ = writeln!(
            output,
            "{},{},{}",
            escape_csv(source),
            escape_csv(target),
            escape_csv(&joined)
        );
    }
    output
}

/// Export a coupling report as `metric,node,value` rows.
///
/// Totals have an empty `node` column; rankings produce one row per entry.
pub fn export_csv_metrics(metrics: &CouplingMetrics) -> String {
    let mut output = String::from("metric,node,value\n");
    let _ = writeln!(output, "total_files,,{}", metrics.total_files);
    let _ = writeln!(output, "total_edges,,{}", metrics.total_edges);
    let _ = writeln!(output, "avg_dependencies,,{:.2}", metrics.avg_dependencies);
    for (node, count) in &metrics.most_depended_on {
        let _ = writeln!(output, "most_depended_on,{},{count}", escape_csv(node));
    }
    for (node, count) in &metrics.most_dependencies {
        let _ = writeln!(output, "most_dependencies,{},{count}", escape_csv(node));
    }
    output
}

/// Escape a field for CSV (RFC 4180 style)
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_export_csv_edges() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("A.swift", "B.swift", "B[type]");
        graph.add_edge("A.swift", "B.swift", "B.run[call]");

        let csv = export_csv_edges(&graph);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["source,target,labels", "A.swift,B.swift,B.run[call];B[type]"]);
    }

    #[test]
    fn test_export_csv_metrics() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("A.m", "B.h", "B[type]");
        let csv = export_csv_metrics(&graph.coupling_metrics());

        assert!(csv.contains("total_files,,1\n"));
        assert!(csv.contains("avg_dependencies,,1.00\n"));
        assert!(csv.contains("most_depended_on,B.h,1\n"));
        assert!(csv.contains("most_dependencies,A.m,1\n"));
    }
}
