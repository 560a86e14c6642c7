//! Chart artifact: plotly.js traces, layout and animation frames.
//!
//! A [`Figure`] is plain JSON underneath. Builders in `visualization` fill it,
//! the patches below adjust it right after construction, and the exporter turns
//! it into an embeddable HTML fragment.

use serde::Serialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Value>,
}

impl Figure {
    /// Empty figure on the dark template.
    pub fn dark() -> Self {
        let mut fig = Self::default();
        fig.layout.insert("template".into(), dark_template());
        fig
    }

    pub fn add_trace(&mut self, trace: Value) {
        self.data.push(trace);
    }

    /// Shallow-merge `patch` into the layout; nested objects are merged too.
    pub fn update_layout(&mut self, patch: Value) {
        if let Value::Object(entries) = patch {
            for (key, value) in entries {
                let value = match (self.layout.get_mut(&key), value) {
                    (Some(Value::Object(existing)), Value::Object(incoming)) => {
                        existing.extend(incoming);
                        continue;
                    }
                    (_, value) => value,
                };
                self.layout.insert(key, value);
            }
        }
    }

    pub fn annotations(&self) -> &[Value] {
        self.layout
            .get("annotations")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_animated(&self) -> bool {
        !self.frames.is_empty()
    }

    // ── Patches ─────────────────────────────────────────────────────────────

    /// Make every animation step redraw the whole plot.
    ///
    /// plotly skips the full redraw between frames by default, which leaves
    /// log-axis bubble charts with stale markers. Applies to every
    /// `updatemenus` button and every slider step that carries frame options.
    pub fn enable_full_redraw(&mut self) {
        for menu in layout_array_mut(&mut self.layout, "updatemenus") {
            if let Some(buttons) = menu.get_mut("buttons").and_then(Value::as_array_mut) {
                for button in buttons {
                    set_frame_redraw(button);
                }
            }
        }
        for slider in layout_array_mut(&mut self.layout, "sliders") {
            if let Some(steps) = slider.get_mut("steps").and_then(Value::as_array_mut) {
                for step in steps {
                    set_frame_redraw(step);
                }
            }
        }
    }

    /// Rewrite `key=value` facet captions to just the bold value.
    pub fn bold_facet_titles(&mut self) {
        for annotation in layout_array_mut(&mut self.layout, "annotations") {
            let Some(text) = annotation.get("text").and_then(Value::as_str) else {
                continue;
            };
            let value = text.rsplit('=').next().unwrap_or(text);
            let bold = format!("<b>{value}</b>");
            annotation["text"] = Value::String(bold);
        }
    }

    // ── Serialization ───────────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Embeddable `<div>` fragment that loads plotly.js from `cdn_url`.
    pub fn to_html_fragment(&self, cdn_url: &str) -> Result<String> {
        let div_id = Uuid::new_v4().to_string();
        let data = script_json(&self.data)?;
        let layout = script_json(&self.layout)?;
        let then = if self.is_animated() {
            format!(
                ".then(function(){{ Plotly.addFrames('{div_id}', {frames}); }})",
                frames = script_json(&self.frames)?
            )
        } else {
            String::new()
        };

        Ok(format!(
            r##"<div>
  <script type="text/javascript">window.PlotlyConfig = {{MathJaxConfig: 'local'}};</script>
  <script charset="utf-8" src="{cdn_url}"></script>
  <div id="{div_id}" class="plotly-graph-div" style="height:100%; width:100%;"></div>
  <script type="text/javascript">
    window.PLOTLYENV = window.PLOTLYENV || {{}};
    if (document.getElementById("{div_id}")) {{
      Plotly.newPlot("{div_id}", {data}, {layout}, {{"responsive": true}}){then};
    }}
  </script>
</div>
"##
        ))
    }
}

/// JSON safe to inline in a `<script>` block: `<`, `>` and `/` only occur
/// inside string literals, where their `\u` escapes decode to the same text.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('/', "\\u002f"))
}

fn layout_array_mut<'a>(
    layout: &'a mut Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a mut Value> {
    layout
        .get_mut(key)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
}

/// `args[1].frame.redraw = true` on an animate control, when present.
fn set_frame_redraw(control: &mut Value) {
    let frame = control
        .get_mut("args")
        .and_then(Value::as_array_mut)
        .and_then(|args| args.get_mut(1))
        .and_then(|opts| opts.get_mut("frame"))
        .and_then(Value::as_object_mut);
    if let Some(frame) = frame {
        frame.insert("redraw".into(), Value::Bool(true));
    }
}

/// Compact rendition of plotly's `plotly_dark` template.
pub fn dark_template() -> Value {
    let axis = json!({
        "gridcolor": "#283442",
        "linecolor": "#506784",
        "ticks": "",
        "zerolinecolor": "#283442",
        "automargin": true,
        "zerolinewidth": 2
    });
    json!({
        "layout": {
            "paper_bgcolor": "rgb(17,17,17)",
            "plot_bgcolor": "rgb(17,17,17)",
            "font": {"color": "#f2f5fa"},
            "hovermode": "closest",
            "hoverlabel": {"align": "left"},
            "colorway": [
                "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A",
                "#19d3f3", "#FF6692", "#B6E880", "#FF97FF", "#FECB52"
            ],
            "xaxis": axis.clone(),
            "yaxis": axis,
            "title": {"x": 0.05},
            "updatemenudefaults": {"bgcolor": "#506784", "borderwidth": 0},
            "sliderdefaults": {
                "bgcolor": "#C8D4E3",
                "bordercolor": "rgb(17,17,17)",
                "borderwidth": 1,
                "tickwidth": 0
            }
        }
    })
}
