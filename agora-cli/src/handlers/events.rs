use agora_shared::types::Event;
use agora_shared::validation::validate_event;

use crate::context::AppContext;
use crate::error::CliResult;
use crate::models::EventArgs;

pub async fn create_event(ctx: &AppContext, args: EventArgs) -> CliResult<String> {
    let username = ctx.require_user()?;
    let is_location_fixed = !args.flexible_location;
    let is_time_fixed = !args.flexible_time;
    validate_event(&args.location, &args.date, is_location_fixed, is_time_fixed)?;

    let event = Event {
        username,
        location: args.location,
        time: args.date,
        time_range: args.time_range,
        is_time_fixed,
        is_location_fixed,
    };
    ctx.client.create_event(&event).await?;

    Ok("Event created successfully!".to_string())
}
