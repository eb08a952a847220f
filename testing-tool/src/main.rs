use anyhow::{anyhow, Result};
use colored::*;
use serde_json::{json, Value};
use std::io::{self, Write};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚚 Vehicle Tracking Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = prompt("URL del servidor [http://localhost:3000]: ")?;
    let base_url = if base_url.is_empty() {
        "http://localhost:3000".to_string()
    } else {
        base_url.trim_end_matches('/').to_string()
    };
    let client = reqwest::Client::new();

    check_health(&client, &base_url).await?;

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Registrar vehículo");
        println!("2. 📋 Listar vehículos");
        println!("3. 📍 Enviar ubicación");
        println!("4. 🗺️  Ver historial de ubicaciones");
        println!("5. 🗑️  Eliminar vehículo");
        println!("6. 🚪 Salir");

        let choice = prompt("Selecciona una opción (1-6): ")?;
        let result = match choice.as_str() {
            "1" => register_vehicle(&client, &base_url).await,
            "2" => list_vehicles(&client, &base_url).await,
            "3" => send_location(&client, &base_url).await,
            "4" => list_locations(&client, &base_url).await,
            "5" => delete_vehicle(&client, &base_url).await,
            "6" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("{}", format!("❌ Error: {}", e).bright_red());
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn prompt_vehicle_id() -> Result<Uuid> {
    let raw = prompt("ID del vehículo: ")?;
    Uuid::parse_str(&raw).map_err(|e| anyhow!("UUID inválido '{}': {}", raw, e))
}

async fn check_health(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let response = client.get(format!("{}/health", base_url)).send().await?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        println!("{}", "✅ Servidor disponible".bright_green());
        println!("{}", serde_json::to_string_pretty(&body)?);
        Ok(())
    } else {
        Err(anyhow!("Health check falló con status {}", status))
    }
}

async fn print_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    let body = response.text().await?;

    let status_line = format!("📥 Status: {}", status);
    if status.is_success() {
        println!("{}", status_line.bright_green());
    } else {
        println!("{}", status_line.bright_red());
    }

    if !body.is_empty() {
        match serde_json::from_str::<Value>(&body) {
            Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
            Err(_) => println!("{}", body),
        }
    }
    Ok(())
}

async fn register_vehicle(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let raw = prompt("ID del vehículo (vacío = generar): ")?;
    let id = if raw.is_empty() {
        Uuid::new_v4()
    } else {
        Uuid::parse_str(&raw)?
    };

    println!("{}", format!("📤 Registrando {}", id).bright_blue());
    let response = client
        .post(format!("{}/vehicles", base_url))
        .json(&json!({ "id": id }))
        .send()
        .await?;
    print_response(response).await
}

async fn list_vehicles(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let response = client.get(format!("{}/vehicles", base_url)).send().await?;
    print_response(response).await
}

async fn send_location(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let id = prompt_vehicle_id()?;
    let lat: f64 = prompt("Latitud [52.53]: ")?.parse().unwrap_or(52.53);
    let lng: f64 = prompt("Longitud [13.403]: ")?.parse().unwrap_or(13.403);

    let payload = json!({
        "lat": lat,
        "lng": lng,
        "at": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    });

    println!("{}", "📦 Payload:".bright_blue());
    println!("{}", serde_json::to_string_pretty(&payload)?);

    let response = client
        .post(format!("{}/vehicles/{}/locations", base_url, id))
        .json(&payload)
        .send()
        .await?;
    print_response(response).await
}

async fn list_locations(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let id = prompt_vehicle_id()?;
    let response = client
        .get(format!("{}/vehicles/{}/locations", base_url, id))
        .send()
        .await?;
    print_response(response).await
}

async fn delete_vehicle(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let id = prompt_vehicle_id()?;
    let response = client
        .delete(format!("{}/vehicles/{}", base_url, id))
        .send()
        .await?;
    print_response(response).await
}
