pub const EXAMPLE_CONFIG: &str = r#"# prefuzz example config
#
# `name` is the shared_prefs file replaced on the device (shared_prefs/<name>.xml).
# `package` and `activity` are only needed when applying to a device.
name: launcher_prefs
package: com.example.launcher
activity: .MainActivity

preferences:
  # Strings pick one of the listed values and are written as element text.
  - name: pref_theme
    type: string
    values: [light, dark, system]

  # Booleans default to [true, false] when no values are given.
  - name: pref_show_hints
    type: boolean

  # Ranges are START..STOP[;STEP] with an inclusive upper bound.
  - name: pref_columns
    type: int
    range: "3..7"

  # A decimal point anywhere switches the whole range to floats.
  - name: pref_icon_scale
    type: float
    range: "0.5..1.5;0.25"

  # Sets draw between min and max members (defaults: 0 and the number of values).
  # Members may repeat unless `distinct: true` is given.
  - name: pref_hidden_apps
    type: set
    values: [com.example.mail, com.example.maps, com.example.camera]
    min: 1
    max: 2
"#;

pub fn print_example_config() {
    print!("{EXAMPLE_CONFIG}");
}
