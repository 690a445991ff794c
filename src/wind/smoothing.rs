/// Trailing moving average: each output is the mean of the up-to-`window`
/// raw values ending at that index. Leading partial windows average over
/// however many values exist. Pure transform; callers supply values in
/// chronological order.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut smoothed = Vec::with_capacity(values.len());
    let mut running = 0.0;

    for (i, value) in values.iter().enumerate() {
        running += value;
        if i >= window {
            running -= values[i - window];
        }
        let span = (i + 1).min(window);
        smoothed.push(running / span as f64);
    }

    smoothed
}
