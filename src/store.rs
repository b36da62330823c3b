// SPDX-License-Identifier: AGPL-3.0-or-later

//! Insertion-ordered performance data store

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::metric::{MetricKey, MetricPoint};

/// Performance data of one check run, rendered in insertion order
#[derive(Debug, Clone, Default)]
pub struct MetricStore {
    points: Vec<MetricPoint>,
    index: HashMap<MetricKey, usize>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a point. Fails if a point with the same metric
    /// and label is already stored.
    pub fn add(&mut self, point: MetricPoint) -> Result<()> {
        point.validate()?;
        let key = point.key();
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateMetric {
                metric: key.metric,
                label: key.label,
            });
        }
        log::debug!("Adding metric {}", point.name());
        self.index.insert(key, self.points.len());
        self.points.push(point);
        Ok(())
    }

    pub fn get(&self, metric: &str, label: &str) -> Option<&MetricPoint> {
        let key = MetricKey {
            metric: metric.to_string(),
            label: label.to_string(),
        };
        self.index.get(&key).map(|&i| &self.points[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in perfdata syntax, separated by single spaces
    pub fn render(&self, json_label: bool) -> String {
        self.points
            .iter()
            .map(|p| p.render(json_label))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<'a> IntoIterator for &'a MetricStore {
    type Item = &'a MetricPoint;
    type IntoIter = std::slice::Iter<'a, MetricPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
