use derive_builder::Builder;

/// Tuning parameters passed to the fill reducing ordering kernel
///
/// Settings are most easily built with [`OrderingSettingsBuilder`]:
///
/// ```no_run
/// use gaussfactor::inference::OrderingSettingsBuilder;
///
/// let settings = OrderingSettingsBuilder::default()
///     .amd_dense_scale(1.5)
///     .build()
///     .unwrap();
/// ```
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct OrderingSettings {
    /// scale applied to the kernel's threshold for treating a
    /// variable as dense.  Dense variables are ordered last.
    #[builder(default = "1.0")]
    pub amd_dense_scale: f64,

    /// enable aggressive absorption of elements in the kernel
    #[builder(default = "true")]
    pub aggressive: bool,
}

impl Default for OrderingSettings {
    fn default() -> OrderingSettings {
        OrderingSettings {
            amd_dense_scale: 1.0,
            aggressive: true,
        }
    }
}

impl OrderingSettingsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(scale) = self.amd_dense_scale {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(format!("amd_dense_scale must be positive, got {scale}"));
            }
        }
        Ok(())
    }
}

#[test]
fn test_settings_builder_defaults() {
    let built = OrderingSettingsBuilder::default().build().unwrap();
    assert_eq!(built, OrderingSettings::default());
}

#[test]
fn test_settings_builder_validation() {
    let result = OrderingSettingsBuilder::default()
        .amd_dense_scale(-1.0)
        .build();
    assert!(result.is_err());

    let settings = OrderingSettingsBuilder::default()
        .aggressive(false)
        .build()
        .unwrap();
    assert!(!settings.aggressive);
}
