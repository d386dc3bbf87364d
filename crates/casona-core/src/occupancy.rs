// ── Occupancy derivation ──
//
// `current_occupancy` and `status` on a room are projections of the
// resident roster. This function is the only writer of those fields;
// every reducer case that touches rooms or residents replaces its room
// collection with the result.

use crate::model::{Resident, ResidentStatus, Room, RoomStatus};

/// Recompute each room's occupancy and status from the roster.
///
/// Occupancy counts residents whose `room_id` matches and whose status
/// is `Active`. Status is `Available` at zero occupancy and `Occupied`
/// otherwise -- over-capacity still reads `Occupied`, and a room parked
/// in `Maintenance` is overwritten on the next derivation, matching
/// how the rest of the system treats the field as fully derived.
pub fn derive_rooms(rooms: &[Room], residents: &[Resident]) -> Vec<Room> {
    rooms
        .iter()
        .map(|room| {
            let current_occupancy = u32::try_from(
                residents
                    .iter()
                    .filter(|r| {
                        r.status == ResidentStatus::Active
                            && r.room_id.as_ref() == Some(&room.id)
                    })
                    .count(),
            )
            .unwrap_or(u32::MAX);

            let status = if current_occupancy == 0 {
                RoomStatus::Available
            } else {
                RoomStatus::Occupied
            };

            Room {
                current_occupancy,
                status,
                ..room.clone()
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{
        EmergencyContact, Gender, Nationality, ResidentId, RoomId, RoomType,
    };
    use chrono::NaiveDate;

    fn room(id: &str, kind: RoomType) -> Room {
        Room {
            id: RoomId::new(id),
            number: id.to_uppercase(),
            kind,
            capacity: kind.capacity(),
            current_occupancy: 0,
            status: RoomStatus::Available,
            monthly_rate: 190.0,
            gender: Gender::Male,
        }
    }

    fn resident(id: &str, room_id: Option<&str>, status: ResidentStatus) -> Resident {
        Resident {
            id: ResidentId::new(id),
            first_name: "Juan".into(),
            last_name: "Pérez".into(),
            nationality: Nationality::Argentina,
            email: format!("{id}@example.com"),
            phone: "+54 11 5555-0000".into(),
            emergency_contact: EmergencyContact {
                name: "María Pérez".into(),
                phone: "+54 11 5555-0001".into(),
                relationship: "madre".into(),
            },
            room_id: room_id.map(RoomId::new),
            check_in_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            check_out_date: None,
            status,
            behavior_notes: Vec::new(),
            documents: Vec::new(),
        }
    }

    #[test]
    fn counts_only_active_residents_in_the_room() {
        let rooms = vec![room("r1", RoomType::Triple)];
        let residents = vec![
            resident("a", Some("r1"), ResidentStatus::Active),
            resident("b", Some("r1"), ResidentStatus::Pending),
            resident("c", Some("r1"), ResidentStatus::Inactive),
            resident("d", Some("r2"), ResidentStatus::Active),
            resident("e", None, ResidentStatus::Active),
        ];

        let derived = derive_rooms(&rooms, &residents);
        assert_eq!(derived[0].current_occupancy, 1);
        assert_eq!(derived[0].status, RoomStatus::Occupied);
    }

    #[test]
    fn empty_room_reads_available() {
        let rooms = vec![room("r1", RoomType::Double)];
        let derived = derive_rooms(&rooms, &[]);
        assert_eq!(derived[0].current_occupancy, 0);
        assert_eq!(derived[0].status, RoomStatus::Available);
    }

    #[test]
    fn full_room_still_reads_occupied() {
        let rooms = vec![room("r1", RoomType::Double)];
        let residents = vec![
            resident("a", Some("r1"), ResidentStatus::Active),
            resident("b", Some("r1"), ResidentStatus::Active),
        ];

        let derived = derive_rooms(&rooms, &residents);
        assert_eq!(derived[0].current_occupancy, 2);
        assert_eq!(derived[0].status, RoomStatus::Occupied);
        assert!(derived[0].is_full());
        assert_eq!(derived[0].vacancies(), 0);
    }

    #[test]
    fn maintenance_status_is_overwritten_by_derivation() {
        let mut r = room("r1", RoomType::Individual);
        r.status = RoomStatus::Maintenance;

        let derived = derive_rooms(&[r], &[]);
        assert_eq!(derived[0].status, RoomStatus::Available);
    }
}
