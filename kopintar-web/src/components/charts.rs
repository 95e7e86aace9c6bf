//! SVG pie and bar charts

use kopintar_common::dashboard::{pie_slices, ChartDatum, PieSlice};
use kopintar_common::locale::format_number;
use leptos::*;

const PIE_SIZE: f64 = 260.0;
const PIE_RADIUS: f64 = 100.0;
const BAR_WIDTH: f64 = 560.0;
const BAR_HEIGHT: f64 = 300.0;
const BAR_MARGIN_LEFT: f64 = 56.0;
const BAR_MARGIN_BOTTOM: f64 = 64.0;
const BAR_MARGIN_TOP: f64 = 16.0;
const LEGEND_MAX_CHARS: usize = 15;

/// Point on a circle, angle clockwise from 12 o'clock
fn polar(cx: f64, cy: f64, r: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (cx + r * rad.sin(), cy - r * rad.cos())
}

/// SVG path of a pie wedge
pub fn arc_path(cx: f64, cy: f64, r: f64, start_deg: f64, end_deg: f64) -> String {
    let sweep = end_deg - start_deg;
    if sweep >= 359.999 {
        // a single arc cannot close on itself
        return format!(
            "M {cx} {top} A {r} {r} 0 1 1 {cx} {bottom} A {r} {r} 0 1 1 {cx} {top} Z",
            top = cy - r,
            bottom = cy + r,
        );
    }
    let (x1, y1) = polar(cx, cy, r, start_deg);
    let (x2, y2) = polar(cx, cy, r, end_deg);
    let large = if sweep > 180.0 { 1 } else { 0 };
    format!(
        "M {cx} {cy} L {:.3} {:.3} A {r} {r} 0 {large} 1 {:.3} {:.3} Z",
        x1, y1, x2, y2
    )
}

/// Percentage label, hidden for slices under 3%
pub fn pie_label(percent: f64) -> Option<String> {
    (percent >= 3.0).then(|| format!("{:.1}%", percent))
}

/// Legend entry, cut at 15 characters
pub fn legend_name(name: &str) -> String {
    if name.chars().count() > LEGEND_MAX_CHARS {
        let head: String = name.chars().take(LEGEND_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Bar rectangles inside the plot area, scaled to the largest value
pub fn bar_layout(data: &[ChartDatum], plot_width: f64, plot_height: f64) -> Vec<BarRect> {
    if data.is_empty() {
        return Vec::new();
    }
    let max = data.iter().map(|d| d.value).fold(0.0, f64::max);
    let slot = plot_width / data.len() as f64;
    let width = slot * 0.7;
    data.iter()
        .enumerate()
        .map(|(i, d)| {
            let height = if max > 0.0 {
                d.value.max(0.0) / max * plot_height
            } else {
                0.0
            };
            BarRect {
                x: i as f64 * slot + (slot - width) / 2.0,
                y: plot_height - height,
                width,
                height,
            }
        })
        .collect()
}

fn default_tooltip(datum: &ChartDatum) -> String {
    format!("{}: {}", datum.name, format_number(datum.value))
}

#[component]
pub fn PieChart(
    #[prop(into)] title: String,
    data: Vec<ChartDatum>,
) -> impl IntoView {
    let slices: Vec<PieSlice> = pie_slices(&data);
    let (hovered, set_hovered) = create_signal(None::<usize>);
    let center = PIE_SIZE / 2.0;

    let body = if slices.is_empty() {
        view! { <p class="chart-empty">"Tidak ada data"</p> }.into_view()
    } else {
        let tooltips: Vec<String> = slices
            .iter()
            .map(|s| format!("{}: {} ({:.1}%)", s.datum.name, format_number(s.datum.value), s.percent))
            .collect();
        let wedges = slices
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let (lx, ly) = polar(center, center, PIE_RADIUS * 0.65, (s.start_deg + s.end_deg) / 2.0);
                view! {
                    <path
                        d=arc_path(center, center, PIE_RADIUS, s.start_deg, s.end_deg)
                        fill=s.datum.fill.clone()
                        class="pie-slice"
                        on:mouseenter=move |_| set_hovered.set(Some(i))
                        on:mouseleave=move |_| set_hovered.set(None)
                    ></path>
                    {pie_label(s.percent).map(|label| view! {
                        <text x=lx y=ly class="pie-label" text-anchor="middle" dominant-baseline="middle">
                            {label}
                        </text>
                    })}
                }
            })
            .collect_view();
        let legend = slices
            .iter()
            .map(|s| {
                view! {
                    <li>
                        <span class="legend-swatch" style=format!("background: {}", s.datum.fill)></span>
                        {legend_name(&s.datum.name)}
                    </li>
                }
            })
            .collect_view();
        view! {
            <svg class="pie-chart" viewBox=format!("0 0 {} {}", PIE_SIZE, PIE_SIZE)>
                {wedges}
            </svg>
            <div class="chart-tooltip">
                {move || hovered.get().and_then(|i| tooltips.get(i).cloned())}
            </div>
            <ul class="chart-legend">{legend}</ul>
        }
        .into_view()
    };

    view! {
        <div class="chart-card">
            <h4>{title}</h4>
            {body}
        </div>
    }
}

#[component]
pub fn BarChart(
    #[prop(into)] title: String,
    data: Vec<ChartDatum>,
    #[prop(optional)] x_label: Option<&'static str>,
    #[prop(optional)] y_label: Option<&'static str>,
    /// Hover text for a bar
    #[prop(default = default_tooltip)]
    tooltip: fn(&ChartDatum) -> String,
) -> impl IntoView {
    let plot_width = BAR_WIDTH - BAR_MARGIN_LEFT;
    let plot_height = BAR_HEIGHT - BAR_MARGIN_BOTTOM - BAR_MARGIN_TOP;
    let rects = bar_layout(&data, plot_width, plot_height);
    let max = data.iter().map(|d| d.value).fold(0.0, f64::max);
    let tooltips: Vec<String> = data.iter().map(tooltip).collect();
    let (hovered, set_hovered) = create_signal(None::<usize>);

    let body = if data.is_empty() {
        view! { <p class="chart-empty">"Tidak ada data"</p> }.into_view()
    } else {
        let bars = data
            .iter()
            .zip(rects)
            .enumerate()
            .map(|(i, (d, r))| {
                let label_x = r.x + r.width / 2.0;
                let label_y = plot_height + 14.0;
                view! {
                    <rect
                        x=r.x
                        y=r.y
                        width=r.width
                        height=r.height
                        rx="4"
                        fill=d.fill.clone()
                        class="bar"
                        on:mouseenter=move |_| set_hovered.set(Some(i))
                        on:mouseleave=move |_| set_hovered.set(None)
                    ></rect>
                    <text
                        x=label_x
                        y=label_y
                        class="bar-label"
                        text-anchor="end"
                        transform=format!("rotate(-35 {} {})", label_x, label_y)
                    >
                        {legend_name(&d.name)}
                    </text>
                }
            })
            .collect_view();
        view! {
            <svg class="bar-chart" viewBox=format!("0 0 {} {}", BAR_WIDTH, BAR_HEIGHT)>
                <g transform=format!("translate({} {})", BAR_MARGIN_LEFT, BAR_MARGIN_TOP)>
                    <line x1="0" y1=plot_height x2=plot_width y2=plot_height class="axis"></line>
                    <line x1="0" y1="0" x2="0" y2=plot_height class="axis"></line>
                    <text x="-6" y="4" class="axis-tick" text-anchor="end">{format_number(max)}</text>
                    <text x="-6" y=plot_height class="axis-tick" text-anchor="end">"0"</text>
                    {bars}
                </g>
                {x_label.map(|label| view! {
                    <text x={BAR_MARGIN_LEFT + plot_width / 2.0} y={BAR_HEIGHT - 4.0} class="axis-label" text-anchor="middle">
                        {label}
                    </text>
                })}
                {y_label.map(|label| view! {
                    <text
                        x="12"
                        y={BAR_MARGIN_TOP + plot_height / 2.0}
                        class="axis-label"
                        text-anchor="middle"
                        transform=format!("rotate(-90 12 {})", BAR_MARGIN_TOP + plot_height / 2.0)
                    >
                        {label}
                    </text>
                })}
            </svg>
            <div class="chart-tooltip">
                {move || hovered.get().and_then(|i| tooltips.get(i).cloned())}
            </div>
        }
        .into_view()
    };

    view! {
        <div class="chart-card">
            <h4>{title}</h4>
            {body}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datum(name: &str, value: f64) -> ChartDatum {
        ChartDatum::new(Some(name.to_string()), value)
    }

    #[test]
    fn test_pie_label_threshold() {
        assert_eq!(pie_label(2.99), None);
        assert_eq!(pie_label(3.0).as_deref(), Some("3.0%"));
        assert_eq!(pie_label(41.666).as_deref(), Some("41.7%"));
    }

    #[test]
    fn test_legend_name_truncates() {
        assert_eq!(legend_name("Arabika"), "Arabika");
        assert_eq!(legend_name("Petik Selektif Merah"), "Petik Selektif ...");
        assert_eq!(legend_name("123456789012345"), "123456789012345");
    }

    #[test]
    fn test_arc_path_quarter() {
        let path = arc_path(100.0, 100.0, 50.0, 0.0, 90.0);
        assert_eq!(
            path,
            "M 100 100 L 100.000 50.000 A 50 50 0 0 1 150.000 100.000 Z"
        );
        assert!(arc_path(100.0, 100.0, 50.0, 0.0, 270.0).contains(" 0 1 1 "));
    }

    #[test]
    fn test_arc_path_full_circle() {
        let path = arc_path(10.0, 10.0, 5.0, 0.0, 360.0);
        assert!(path.starts_with("M 10 5 A 5 5"));
        assert!(path.ends_with("Z"));
    }

    #[test]
    fn test_bar_layout_scales_to_max() {
        let rects = bar_layout(&[datum("a", 50.0), datum("b", 100.0)], 200.0, 100.0);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[1].height, 100.0);
        assert_eq!(rects[1].y, 0.0);
        assert_eq!(rects[0].height, 50.0);
        assert_eq!(rects[0].width, 70.0);
        assert_eq!(rects[0].x, 15.0);
        assert!(bar_layout(&[], 200.0, 100.0).is_empty());
    }
}
