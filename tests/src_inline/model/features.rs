use super::*;

#[test]
fn test_feature_order_is_fixed() {
    assert_eq!(N_FEATURES, 13);
    assert_eq!(FEATURE_COLUMNS[0], "Matematika");
    assert_eq!(FEATURE_COLUMNS[6], "Agama Islam");
    assert_eq!(FEATURE_COLUMNS[12], "B_Inggris");
}

#[test]
fn test_feature_vector_keeps_order() {
    let mut values = [0.0; N_FEATURES];
    for (i, v) in values.iter_mut().enumerate() {
        *v = i as f64 * 10.0;
    }
    let fv = FeatureVector::new(values);
    assert_eq!(fv.as_slice().len(), N_FEATURES);
    assert_eq!(fv.as_slice()[2], 20.0);
    assert_eq!(fv.as_slice()[12], 120.0);
}
