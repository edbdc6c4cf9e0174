use crate::health::profile_bmi;
use crate::models::FitnessProfile;

pub fn render_plan_page(profile: &FitnessProfile) -> String {
    let mut profile_rows = String::new();
    for (label, value) in &profile.user_data {
        profile_rows.push_str(&format!(
            r#"<li class="list-group-item">{} <span class="badge">{}</span></li>"#,
            escape(label),
            escape(value)
        ));
    }

    let mut workouts = String::new();
    for workout in &profile.workout_plan {
        workouts.push_str(&format!(
            r#"<div class="accordion-item"><button class="accordion-button">{} - {}</button><ul class="list-group">"#,
            escape(&workout.day),
            escape(&workout.focus)
        ));
        for exercise in &workout.exercises {
            workouts.push_str(&format!(
                r#"<li class="list-group-item">{}</li>"#,
                escape(exercise)
            ));
        }
        workouts.push_str("</ul></div>");
    }

    let mut meals = String::new();
    for day in &profile.diet_plan {
        meals.push_str(&format!(
            r#"<div class="card"><h5 class="card-title">{}</h5><ul class="list-group">"#,
            escape(&day.day)
        ));
        for meal in &day.meals {
            meals.push_str(&format!(
                r#"<li class="list-group-item">{}: {}</li>"#,
                escape(&meal.name),
                escape(&meal.description)
            ));
        }
        meals.push_str("</ul></div>");
    }

    let metrics = match profile_bmi(profile) {
        Some(bmi) => format!(
            r#"<div class="stat"><span class="label">BMI</span><span class="value bmi-result">{:.1}</span></div><p class="alert">Your BMI category is {}.</p>"#,
            bmi.value, bmi.category
        ),
        None => {
            r#"<p class="alert">Add your height and weight to see your BMI.</p>"#.to_string()
        }
    };

    PAGE_HTML
        .replace("{{PROFILE}}", &profile_rows)
        .replace("{{WORKOUTS}}", &workouts)
        .replace("{{MEALS}}", &meals)
        .replace("{{METRICS}}", &metrics)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Your Fitness Plan</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .list-group {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .list-group-item {
      background: white;
      border-radius: 12px;
      padding: 10px 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .badge {
      float: right;
      color: var(--accent-2);
      font-weight: 600;
    }

    .accordion-button {
      appearance: none;
      border: none;
      background: none;
      font-size: 1.1rem;
      font-weight: 600;
      padding: 8px 0;
      color: var(--accent-2);
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Your Fitness Plan</h1>
      <p class="subtitle">Ask the assistant anything about your workouts and meals.</p>
    </header>
    <section>
      <h2>Profile</h2>
      <ul class="list-group">{{PROFILE}}</ul>
    </section>
    <section>
      <h2>Health</h2>
      {{METRICS}}
    </section>
    <section class="accordion">
      <h2>Workout Plan</h2>
      {{WORKOUTS}}
    </section>
    <section>
      <h2>Diet Plan</h2>
      {{MEALS}}
    </section>
  </main>
</body>
</html>
"#;
